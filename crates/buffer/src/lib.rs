// Chunk: docs/chunks/splice_buffer - Non-destructive splice buffer over an immutable source
// Chunk: docs/chunks/essential_insertions - Anchor protection for essential insertions

//! splice-buffer: records edits against an immutable source and generates
//! the result.
//!
//! A source-to-source rewriting tool computes edits from positions in the
//! *original* text, often out of order. This crate records those edits
//! without touching the source and combines them when the output is
//! generated.
//!
//! # Overview
//!
//! The main type is [`SpliceBuffer`], which provides:
//! - Left and right insertion at any source offset
//! - Removal of source ranges with interval-union semantics
//! - Essential insertions whose anchoring content may not be removed
//! - Generation of the final output, as often as needed
//!
//! # Example
//!
//! ```
//! use splice_buffer::SpliceBuffer;
//!
//! let mut buffer = SpliceBuffer::from("Hello World");
//!
//! buffer.insert_right(6, "Beautiful ", false)?;
//! buffer.insert_left(6, "Great ", false)?;
//! assert_eq!(buffer.generate(), b"Hello Great Beautiful World");
//!
//! // Removal is an interval union; re-removing is harmless.
//! buffer.remove(0, 6)?;
//! buffer.remove(2, 3)?;
//! assert_eq!(buffer.generate(), b"Great Beautiful World");
//! # Ok::<(), splice_buffer::SpliceError>(())
//! ```
//!
//! # Ordering at one offset
//!
//! All left inserts come first, in call order, then all right inserts, in
//! call order, then the source content continuing from the offset:
//!
//! - `insert_left` glues content to the end of whatever precedes the offset
//! - `insert_right` glues content to the start of whatever follows it
//!
//! # Essential insertions
//!
//! An insertion made with `essential = true` pins the source byte it is
//! glued to: the one before the offset for `insert_left`, the one at it for
//! `insert_right`. Any later [`SpliceBuffer::remove`] that would take that
//! byte out fails with [`SpliceError::EssentialContentRemoved`] and changes
//! nothing, whatever order the edits arrived in. Ordinary insertions are never removed either; they simply stay
//! put when their surroundings go.

mod chunk;
mod chunk_list;
mod edit;
mod error;
mod removed_ranges;
mod splice_buffer;

pub use chunk::Side;
pub use edit::Edit;
pub use error::{ApplyError, Result, SpliceError};
pub use splice_buffer::SpliceBuffer;
