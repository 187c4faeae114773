//! Typed error definitions for renum.
//! Every failure the engine can produce is a distinct, named condition so the
//! command layer can branch on cause and turn it into a user-facing message.

use std::io;
use thiserror::Error;

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, FileSetError>;

#[derive(Debug, Error)]
pub enum FileSetError {
    #[error("index {index} is not assigned in the file set")]
    IndexUnassigned { index: i64 },

    #[error("index {index} is already assigned; cannot move index {from} onto it")]
    IndexAssigned { index: i64, from: i64 },

    #[error("file type '{file_type}' is not assigned at index {index}")]
    TypeUnassigned { index: i64, file_type: String },

    /// Range-level collision, raised by `move_range` only after every
    /// completed sub-move has been rolled back.
    #[error("range cannot be moved: index {from} collides with occupied index {to}")]
    FileCollision { from: i64, to: i64 },

    #[error("ranges {first:?} and {second:?} overlap and cannot be switched")]
    OverlappingRanges {
        first: (i64, i64),
        second: (i64, i64),
    },

    #[error("file set has a maximum index of {max_index}; refusing to scan more than {limit} indexes")]
    TooManyFiles { max_index: i64, limit: i64 },

    #[error("file '{name}' does not exist or is not a regular file")]
    FileNotFound { name: String },

    #[error("({left}, {right}) does not describe a spot between two adjacent indexes")]
    InvalidSpot { left: i64, right: i64 },

    #[error("index {index} is negative")]
    NegativeIndex { index: i64 },

    #[error("pattern '{pattern}' is invalid; it must contain exactly one un-escaped '*'")]
    InvalidPattern { pattern: String },

    /// User-written spot or range that does not parse.
    #[error("could not expand '{input}': expected {expected}")]
    Expansion {
        input: String,
        expected: &'static str,
    },

    #[error("failed to enumerate directory contents: {source}")]
    Scan {
        #[source]
        source: io::Error,
    },

    #[error("failed to rename '{from}' to '{to}': {source}")]
    Rename {
        from: String,
        to: String,
        #[source]
        source: io::Error,
    },
}
