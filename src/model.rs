//! Actor and movie records stored by the catalog.

use crate::primitives::OrderedSeq;
use crate::types::{ActorId, Keyed, MovieId, Rated, Rating};

/// A performer and the movies they appear in.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Unique key.
    pub id: ActorId,
    /// Display name.
    pub name: String,
    /// Year of birth.
    pub birth_year: i32,
    /// User rating, if one was given.
    pub rating: Option<Rating>,
    /// Filmography in linking order.
    pub movies: OrderedSeq<MovieId>,
}

impl Actor {
    /// Creates an unrated actor with an empty filmography.
    pub fn new(id: ActorId, name: impl Into<String>, birth_year: i32) -> Self {
        Self {
            id,
            name: name.into(),
            birth_year,
            rating: None,
            movies: OrderedSeq::new(),
        }
    }

    /// Sets the initial rating.
    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }
}

/// A movie and its cast.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    /// Unique key.
    pub id: MovieId,
    /// Display title.
    pub title: String,
    /// Release year.
    pub year: i32,
    /// User rating, if one was given.
    pub rating: Option<Rating>,
    /// Cast in linking order.
    pub cast: OrderedSeq<ActorId>,
}

impl Movie {
    /// Creates an unrated movie with an empty cast.
    pub fn new(id: MovieId, title: impl Into<String>, year: i32) -> Self {
        Self {
            id,
            title: title.into(),
            year,
            rating: None,
            cast: OrderedSeq::new(),
        }
    }

    /// Sets the initial rating.
    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Appends cast members.
    pub fn with_cast(mut self, cast: impl IntoIterator<Item = ActorId>) -> Self {
        self.cast.extend(cast);
        self
    }
}

impl Keyed for Actor {
    fn key(&self) -> i64 {
        self.id.0
    }
}

impl Keyed for Movie {
    fn key(&self) -> i64 {
        self.id.0
    }
}

impl Rated for Actor {
    fn rating(&self) -> Option<Rating> {
        self.rating
    }
}

impl Rated for Movie {
    fn rating(&self) -> Option<Rating> {
        self.rating
    }
}
