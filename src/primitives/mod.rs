#![forbid(unsafe_code)]

//! Low-level containers shared by the storage and graph layers.

pub mod ring;
pub mod seq;

pub use ring::RingQueue;
pub use seq::OrderedSeq;
