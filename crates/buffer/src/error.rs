// Chunk: docs/chunks/splice_buffer - Non-destructive splice buffer over an immutable source

//! Error types for splice buffer operations.
//!
//! Every error is raised before the buffer is touched, so a failed call
//! leaves the generated output exactly as it was.

use std::ops::Range;

use thiserror::Error;

use crate::chunk::Side;

/// Errors returned by [`SpliceBuffer`](crate::SpliceBuffer) operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpliceError {
    /// An insertion offset lies past the end of the source.
    #[error("offset {offset} is out of bounds for source length {len}")]
    InvalidOffset { offset: usize, len: usize },

    /// A removal range does not fit inside the source.
    #[error("range at {offset} with length {length} is out of bounds for source length {len}")]
    InvalidRange {
        offset: usize,
        length: usize,
        len: usize,
    },

    // Chunk: docs/chunks/essential_insertions - Anchor protection for essential insertions
    /// An essential insertion was requested where its anchor is already removed.
    #[error("essential {side} insertion at {offset} has no live anchor")]
    EssentialAnchorUnavailable { offset: usize, side: Side },

    /// A removal would take out the whole anchor of an essential insertion.
    #[error(
        "removing {length} at {offset} would remove anchor {anchor:?} of an essential insertion"
    )]
    EssentialContentRemoved {
        offset: usize,
        length: usize,
        anchor: Range<usize>,
    },

    /// Generated output is not valid UTF-8.
    #[error("generated output is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },
}

/// Result alias for splice buffer operations.
pub type Result<T> = std::result::Result<T, SpliceError>;

// Chunk: docs/chunks/edit_scripts - Serializable edit scripts
/// Failure while applying an edit script, naming the edit that was rejected.
///
/// Edits before `index` stay applied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("edit #{index} was rejected: {source}")]
pub struct ApplyError {
    pub index: usize,
    pub source: SpliceError,
}
