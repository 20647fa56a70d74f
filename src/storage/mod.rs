#![forbid(unsafe_code)]

//! In-memory indexes: the primary keyed table and the rating index.

pub mod rating_index;
pub mod table;

pub use rating_index::RatingIndex;
pub use table::{KeyedTable, DEFAULT_CAPACITY};
