#![forbid(unsafe_code)]

//! Actor co-occurrence graph derived from the actor and movie tables.

mod cooccurrence;

pub use cooccurrence::{bounded_bfs, CoGraph, GraphLimits, Reach, DEFAULT_MAX_CAST, MAX_ACTORS};
