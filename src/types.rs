//! Codec implementations for common types.

pub mod collections;
pub mod primitives;
pub mod tuple;
