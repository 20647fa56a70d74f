#![forbid(unsafe_code)]

//! Actor/movie catalog: the facade the loader and query layers talk to.
//!
//! The catalog owns both keyed tables and both rating indexes and keeps them
//! consistent: cast links are mirrored on both records, and every rated
//! record has exactly one snapshot in its rating index. The co-occurrence
//! graph is rebuilt for each connectivity query and dropped afterwards.

mod options;

pub use options::{CatalogOptions, DEFAULT_DEPTH};

use tracing::debug;

use crate::graph::CoGraph;
use crate::model::{Actor, Movie};
use crate::storage::{KeyedTable, RatingIndex};
use crate::types::{ActorId, CatalogError, Keyed, MovieId, Rated, Rating, Result};

/// Actors reachable from a start actor through shared movies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownBy {
    /// Reached actors in discovery order, start excluded.
    pub actors: Vec<ActorId>,
    /// Discoveries that were not expanded because the traversal queue was
    /// full.
    pub dropped: usize,
}

/// In-memory actor and movie store.
#[derive(Debug)]
pub struct Catalog {
    options: CatalogOptions,
    actors: KeyedTable<Actor>,
    movies: KeyedTable<Movie>,
    actor_ratings: RatingIndex<Actor>,
    movie_ratings: RatingIndex<Movie>,
}

impl Catalog {
    /// Creates an empty catalog with default options.
    pub fn new() -> Self {
        Self::build(CatalogOptions::default())
    }

    /// Creates an empty catalog after validating `options`.
    pub fn with_options(options: CatalogOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(options))
    }

    fn build(options: CatalogOptions) -> Self {
        Self {
            actors: KeyedTable::with_capacity(options.table_capacity),
            movies: KeyedTable::with_capacity(options.table_capacity),
            actor_ratings: RatingIndex::new(),
            movie_ratings: RatingIndex::new(),
            options,
        }
    }

    /// Options the catalog was built with.
    pub fn options(&self) -> &CatalogOptions {
        &self.options
    }

    /// Actor table.
    pub fn actors(&self) -> &KeyedTable<Actor> {
        &self.actors
    }

    /// Movie table.
    pub fn movies(&self) -> &KeyedTable<Movie> {
        &self.movies
    }

    /// Number of stored actors.
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Number of stored movies.
    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    /// Looks up an actor.
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.find(id.0)
    }

    /// Looks up a movie.
    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.find(id.0)
    }

    /// Stores `actor`, replacing any record with the same id. Returns the
    /// replaced record.
    ///
    /// Links held by the replaced record are kept. Movies listed in
    /// `actor.movies` are linked on both sides; ids of absent movies are
    /// discarded.
    pub fn insert_actor(&mut self, mut actor: Actor) -> Option<Actor> {
        let id = actor.id;
        let requested = std::mem::take(&mut actor.movies);
        if let Some(existing) = self.actors.find(id.0) {
            actor.movies = existing.movies.clone();
        }
        let previous = self.actors.insert(actor);
        let stale = previous.as_ref().and_then(Rated::rating);
        resync(&mut self.actor_ratings, stale, self.actors.find(id.0));
        let mut discarded = 0usize;
        for movie_id in &requested {
            if self.movies.contains(movie_id.0) {
                self.mirror_link(*movie_id, id);
            } else {
                discarded += 1;
            }
        }
        debug!(
            actor = id.0,
            replaced = previous.is_some(),
            discarded,
            "catalog.actor.insert"
        );
        previous
    }

    /// Stores `movie`, replacing any record with the same id. Returns the
    /// replaced record.
    ///
    /// Links held by the replaced record are kept. Actors listed in
    /// `movie.cast` are linked on both sides; ids of absent actors are
    /// discarded.
    pub fn insert_movie(&mut self, mut movie: Movie) -> Option<Movie> {
        let id = movie.id;
        let requested = std::mem::take(&mut movie.cast);
        if let Some(existing) = self.movies.find(id.0) {
            movie.cast = existing.cast.clone();
        }
        let previous = self.movies.insert(movie);
        let stale = previous.as_ref().and_then(Rated::rating);
        resync(&mut self.movie_ratings, stale, self.movies.find(id.0));
        let mut discarded = 0usize;
        for actor_id in &requested {
            if self.actors.contains(actor_id.0) {
                self.mirror_link(id, *actor_id);
            } else {
                discarded += 1;
            }
        }
        debug!(
            movie = id.0,
            replaced = previous.is_some(),
            discarded,
            "catalog.movie.insert"
        );
        previous
    }

    /// Records that `actor_id` appears in `movie_id`, on both records.
    /// Returns `false` when the link already existed.
    pub fn link_cast(&mut self, movie_id: MovieId, actor_id: ActorId) -> Result<bool> {
        if !self.actors.contains(actor_id.0) {
            return Err(CatalogError::actor_not_found(actor_id));
        }
        if !self.movies.contains(movie_id.0) {
            return Err(CatalogError::movie_not_found(movie_id));
        }
        let linked = self.mirror_link(movie_id, actor_id);
        if linked {
            debug!(movie = movie_id.0, actor = actor_id.0, "catalog.cast.link");
        }
        Ok(linked)
    }

    /// Removes the link between `movie_id` and `actor_id`. Returns `false`
    /// when they were not linked.
    pub fn unlink_cast(&mut self, movie_id: MovieId, actor_id: ActorId) -> Result<bool> {
        if !self.actors.contains(actor_id.0) {
            return Err(CatalogError::actor_not_found(actor_id));
        }
        let movie = self
            .movies
            .find_mut(movie_id.0)
            .ok_or_else(|| CatalogError::movie_not_found(movie_id))?;
        let removed = movie.cast.remove(&actor_id);
        if let Some(actor) = self.actors.find_mut(actor_id.0) {
            actor.movies.remove(&movie_id);
        }
        if removed {
            self.refresh_movie(movie_id);
            self.refresh_actor(actor_id);
            debug!(movie = movie_id.0, actor = actor_id.0, "catalog.cast.unlink");
        }
        Ok(removed)
    }

    /// Removes an actor, detaching it from every cast that lists it.
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        let actor = self.actors.remove(id.0)?;
        for movie_id in &actor.movies {
            if let Some(movie) = self.movies.find_mut(movie_id.0) {
                if movie.cast.remove(&id) {
                    self.refresh_movie(*movie_id);
                }
            }
        }
        if let Some(rating) = actor.rating {
            self.actor_ratings
                .remove_where(rating, |snapshot| snapshot.id == id);
        }
        debug!(actor = id.0, "catalog.actor.remove");
        Some(actor)
    }

    /// Removes a movie, detaching it from every filmography that lists it.
    pub fn remove_movie(&mut self, id: MovieId) -> Option<Movie> {
        let movie = self.movies.remove(id.0)?;
        for actor_id in &movie.cast {
            if let Some(actor) = self.actors.find_mut(actor_id.0) {
                if actor.movies.remove(&id) {
                    self.refresh_actor(*actor_id);
                }
            }
        }
        if let Some(rating) = movie.rating {
            self.movie_ratings
                .remove_where(rating, |snapshot| snapshot.id == id);
        }
        debug!(movie = id.0, "catalog.movie.remove");
        Some(movie)
    }

    /// Sets a movie's rating and moves its rating-index snapshot.
    pub fn rate_movie(&mut self, id: MovieId, rating: Rating) -> Result<()> {
        let movie = self
            .movies
            .find_mut(id.0)
            .ok_or_else(|| CatalogError::movie_not_found(id))?;
        let stale = movie.rating.replace(rating);
        resync(&mut self.movie_ratings, stale, self.movies.find(id.0));
        debug!(movie = id.0, rating = rating.get(), "catalog.movie.rate");
        Ok(())
    }

    /// Sets an actor's rating and moves its rating-index snapshot.
    pub fn rate_actor(&mut self, id: ActorId, rating: Rating) -> Result<()> {
        let actor = self
            .actors
            .find_mut(id.0)
            .ok_or_else(|| CatalogError::actor_not_found(id))?;
        let stale = actor.rating.replace(rating);
        resync(&mut self.actor_ratings, stale, self.actors.find(id.0));
        debug!(actor = id.0, rating = rating.get(), "catalog.actor.rate");
        Ok(())
    }

    /// Rated movies in ascending rating order.
    pub fn movies_by_rating(&self) -> Vec<&Movie> {
        self.movie_ratings.iter().collect()
    }

    /// Rated movies with `min <= rating <= max`, ascending.
    pub fn movies_in_rating_range(&self, min: Rating, max: Rating) -> Result<Vec<&Movie>> {
        check_range(min, max)?;
        Ok(self.movie_ratings.range(min, max).collect())
    }

    /// Rated actors in ascending rating order.
    pub fn actors_by_rating(&self) -> Vec<&Actor> {
        self.actor_ratings.iter().collect()
    }

    /// Rated actors with `min <= rating <= max`, ascending.
    pub fn actors_in_rating_range(&self, min: Rating, max: Rating) -> Result<Vec<&Actor>> {
        check_range(min, max)?;
        Ok(self.actor_ratings.range(min, max).collect())
    }

    /// Actors whose name contains `fragment`, ignoring case.
    pub fn find_actors_by_name(&self, fragment: &str) -> Vec<&Actor> {
        let needle = fragment.to_lowercase();
        self.actors
            .iter()
            .filter(|actor| actor.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Movies whose title contains `fragment`, ignoring case.
    pub fn find_movies_by_title(&self, fragment: &str) -> Vec<&Movie> {
        let needle = fragment.to_lowercase();
        self.movies
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Movies released between `from` and `to`, inclusive.
    pub fn movies_in_year_range(&self, from: i32, to: i32) -> Vec<&Movie> {
        self.movies
            .iter()
            .filter(|movie| (from..=to).contains(&movie.year))
            .collect()
    }

    /// Movies an actor appears in, in linking order. Dangling ids are
    /// skipped.
    pub fn filmography(&self, id: ActorId) -> Result<Vec<&Movie>> {
        let actor = self
            .actor(id)
            .ok_or_else(|| CatalogError::actor_not_found(id))?;
        Ok(actor
            .movies
            .iter()
            .filter_map(|movie_id| self.movie(*movie_id))
            .collect())
    }

    /// Cast of a movie, in linking order.
    pub fn cast_of(&self, id: MovieId) -> Result<Vec<&Actor>> {
        let movie = self
            .movie(id)
            .ok_or_else(|| CatalogError::movie_not_found(id))?;
        Ok(movie
            .cast
            .iter()
            .filter_map(|actor_id| self.actor(*actor_id))
            .collect())
    }

    /// Materializes the co-occurrence graph from the current tables.
    pub fn graph(&self) -> CoGraph {
        CoGraph::build(&self.actors, &self.movies, self.options.graph_limits())
    }

    /// Actors within `depth` shared-movie hops of `id`.
    pub fn known_by(&self, id: ActorId, depth: usize) -> Result<KnownBy> {
        if !self.actors.contains(id.0) {
            return Err(CatalogError::actor_not_found(id));
        }
        let graph = self.graph();
        let start = graph.index_of(id).ok_or_else(|| {
            CatalogError::InvalidArgument(format!(
                "actor {id} is not indexed; graph holds at most {} actors",
                self.options.max_actors
            ))
        })?;
        let reach = graph.find_connected(start, depth);
        let actors = reach
            .found
            .iter()
            .filter_map(|idx| graph.actor_at(*idx))
            .collect();
        debug!(actor = id.0, depth, dropped = reach.dropped, "catalog.known_by");
        Ok(KnownBy {
            actors,
            dropped: reach.dropped,
        })
    }

    /// [`Catalog::known_by`] using the configured default depth.
    pub fn known_by_default(&self, id: ActorId) -> Result<KnownBy> {
        self.known_by(id, self.options.default_depth)
    }

    /// Actors sharing at least one movie with `id`.
    pub fn co_stars(&self, id: ActorId) -> Result<Vec<ActorId>> {
        Ok(self.known_by(id, 1)?.actors)
    }

    /// Drops every record and index entry.
    pub fn clear(&mut self) {
        self.actors.clear();
        self.movies.clear();
        self.actor_ratings.clear();
        self.movie_ratings.clear();
        debug!("catalog.clear");
    }

    // Adds whichever half of the link is missing. Both records must exist.
    fn mirror_link(&mut self, movie_id: MovieId, actor_id: ActorId) -> bool {
        let mut movie_changed = false;
        if let Some(movie) = self.movies.find_mut(movie_id.0) {
            if !movie.cast.contains(&actor_id) {
                movie.cast.add(actor_id);
                movie_changed = true;
            }
        }
        let mut actor_changed = false;
        if let Some(actor) = self.actors.find_mut(actor_id.0) {
            if !actor.movies.contains(&movie_id) {
                actor.movies.add(movie_id);
                actor_changed = true;
            }
        }
        if movie_changed {
            self.refresh_movie(movie_id);
        }
        if actor_changed {
            self.refresh_actor(actor_id);
        }
        movie_changed || actor_changed
    }

    fn refresh_movie(&mut self, id: MovieId) {
        let current = self.movies.find(id.0);
        resync(
            &mut self.movie_ratings,
            current.and_then(Rated::rating),
            current,
        );
    }

    fn refresh_actor(&mut self, id: ActorId) {
        let current = self.actors.find(id.0);
        resync(
            &mut self.actor_ratings,
            current.and_then(Rated::rating),
            current,
        );
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Replaces the snapshot filed under `stale` with a fresh copy of `current`.
fn resync<T>(index: &mut RatingIndex<T>, stale: Option<Rating>, current: Option<&T>)
where
    T: Keyed + Rated + Clone,
{
    let Some(current) = current else {
        return;
    };
    let key = current.key();
    if let Some(rating) = stale {
        index.remove_where(rating, |snapshot| snapshot.key() == key);
    }
    if current.rating().is_some() {
        index.insert(current.clone());
    }
}

fn check_range(min: Rating, max: Rating) -> Result<()> {
    if min > max {
        return Err(CatalogError::InvalidArgument(format!(
            "empty rating range {min}..={max}"
        )));
    }
    Ok(())
}
