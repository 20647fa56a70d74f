//! In-memory actor/movie catalog built on hand-rolled containers: a chained
//! hash table, an ordered singly linked sequence, a rating-bucketed search
//! tree and an actor co-occurrence graph with bounded breadth-first search.

#![warn(missing_docs)]

pub mod catalog;
pub mod graph;
pub mod model;
pub mod primitives;
pub mod storage;
pub mod types;

pub use catalog::{Catalog, CatalogOptions, KnownBy};
pub use graph::{CoGraph, GraphLimits, Reach};
pub use model::{Actor, Movie};
pub use primitives::{OrderedSeq, RingQueue};
pub use storage::{KeyedTable, RatingIndex};
pub use types::{ActorId, CatalogError, Keyed, MovieId, Rated, Rating, Result};
