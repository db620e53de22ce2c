//! Error types for codec operations

use thiserror::Error;

/// Error type for codec operations.
///
/// Every error is fatal to the in-progress encode or decode: a failed
/// [`Serializer`](crate::Serializer) or [`Deserializer`](crate::Deserializer)
/// must be discarded, not resumed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("break offset {0} reached")]
    BreakOffsetReached(usize),
    #[error("out of bounds read at offset {offset}: need {requested} payload bytes, {available} bytes left")]
    OutOfBoundsRead {
        offset: usize,
        requested: usize,
        available: usize,
    },
    #[error("integrity tag mismatch at offset {offset}: expected {expected:#04x}, found {found:#04x}")]
    IntegrityMismatch {
        offset: usize,
        expected: u8,
        found: u8,
    },
    #[error("missing factory for type {0}")]
    MissingFactory(&'static str),
    #[error("invalid utf-8 in text starting at offset {0}")]
    InvalidText(usize),
}
