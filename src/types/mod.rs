#![forbid(unsafe_code)]

//! Identifier newtypes, the rating scale, record capabilities and the crate
//! error type.

use std::fmt;

/// Key of an [`crate::model::Actor`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct ActorId(pub i64);
/// Key of a [`crate::model::Movie`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct MovieId(pub i64);

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted rating.
pub const MAX_RATING: u8 = 10;

/// User rating on the closed scale `1..=10`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Rating(u8);

impl Rating {
    /// Lowest rating.
    pub const MIN: Rating = Rating(MIN_RATING);
    /// Highest rating.
    pub const MAX: Rating = Rating(MAX_RATING);

    /// Validates `value` against the rating scale.
    pub fn new(value: u8) -> Result<Self> {
        if (MIN_RATING..=MAX_RATING).contains(&value) {
            Ok(Rating(value))
        } else {
            Err(CatalogError::InvalidArgument(format!(
                "rating {value} outside {MIN_RATING}..={MAX_RATING}"
            )))
        }
    }

    /// Raw rating value.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = CatalogError;

    fn try_from(value: u8) -> Result<Self> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{MAX_RATING}", self.0)
    }
}

/// Records addressable by a unique integer key.
pub trait Keyed {
    /// Returns the record's key. Two records with the same key are the same
    /// entity as far as a [`crate::storage::KeyedTable`] is concerned.
    fn key(&self) -> i64;
}

/// Records that can be placed in a [`crate::storage::RatingIndex`].
pub trait Rated {
    /// Rating used as the index key, or `None` when the record is unrated.
    fn rating(&self) -> Option<Rating>;
}

/// Errors surfaced by [`crate::catalog::Catalog`] operations.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    /// A referenced actor or movie key is absent.
    #[error("{kind} {key} not found")]
    NotFound {
        /// Record kind (`"actor"` or `"movie"`).
        kind: &'static str,
        /// Missing key.
        key: i64,
    },
    /// A caller-supplied value was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Option values that cannot be used to build a catalog.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Malformed options file.
    #[error("config parse: {0}")]
    ConfigParse(#[from] toml::de::Error),
    /// I/O failure while reading an options file.
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    pub(crate) fn actor_not_found(id: ActorId) -> Self {
        CatalogError::NotFound {
            kind: "actor",
            key: id.0,
        }
    }

    pub(crate) fn movie_not_found(id: MovieId) -> Self {
        CatalogError::NotFound {
            kind: "movie",
            key: id.0,
        }
    }
}

/// Result alias used across the catalog facade.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(11).is_err());
        assert_eq!(Rating::new(1).unwrap().get(), 1);
        assert_eq!(Rating::try_from(10u8).unwrap().get(), 10);
    }

    #[test]
    fn rating_orders_by_value() {
        let low = Rating::new(3).unwrap();
        let high = Rating::new(8).unwrap();
        assert!(low < high);
        assert_eq!(high.to_string(), "8/10");
    }

    #[test]
    fn not_found_message_names_kind() {
        let err = CatalogError::actor_not_found(ActorId(7));
        assert_eq!(err.to_string(), "actor 7 not found");
    }
}
