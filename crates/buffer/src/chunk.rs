// Chunk: docs/chunks/splice_buffer - Non-destructive splice buffer over an immutable source

//! Chunk records: the atomic units of a splice buffer's chunk list.

use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which neighbor an insertion is glued to at its offset.
///
/// `Left` inserts stick to the end of the content before the offset,
/// `Right` inserts to the start of the content after it. At a single
/// offset every left insert is generated before every right insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The source byte a `self` insert at `offset` stays adjacent to, in a
    /// source of `len` bytes, however its chunk is split later. `None` at the
    /// source edges.
    pub(crate) fn anchor_at(self, offset: usize, len: usize) -> Option<Range<usize>> {
        match self {
            Side::Left => offset.checked_sub(1).map(|prev| prev..offset),
            Side::Right => (offset < len).then(|| offset..offset + 1),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// A non-empty `[start, end)` slice of the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ContentChunk {
    pub start: usize,
    pub end: usize,
    pub removed: bool,
}

impl ContentChunk {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start < end, "content chunk must be non-empty");
        Self {
            start,
            end,
            removed: false,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// True when `offset` falls strictly between the chunk's ends.
    pub fn splits_at(&self, offset: usize) -> bool {
        self.start < offset && offset < self.end
    }

    /// Shrinks this chunk to `[start, offset)` and returns `[offset, end)`.
    ///
    /// The tail inherits the removed flag.
    pub fn split_off(&mut self, offset: usize) -> ContentChunk {
        debug_assert!(self.splits_at(offset));
        let tail = ContentChunk {
            start: offset,
            end: self.end,
            removed: self.removed,
        };
        self.end = offset;
        tail
    }
}

/// Content supplied by the caller, threaded in at a chunk boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InsertedChunk {
    pub payload: Vec<u8>,
    pub side: Side,
    pub essential: bool,
    /// Source byte this insert is glued to. `None` at the source edges
    /// (left at 0, right at the end).
    pub anchor: Option<Range<usize>>,
}

impl InsertedChunk {
    /// Anchor range whose full removal must be refused.
    pub fn protected_anchor(&self) -> Option<&Range<usize>> {
        if self.essential {
            self.anchor.as_ref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Chunk {
    Content(ContentChunk),
    Inserted(InsertedChunk),
}

impl Chunk {
    pub fn as_content(&self) -> Option<&ContentChunk> {
        match self {
            Chunk::Content(c) => Some(c),
            Chunk::Inserted(_) => None,
        }
    }

    pub fn is_inserted(&self) -> bool {
        matches!(self, Chunk::Inserted(_))
    }

    /// Number of bytes this chunk contributes to generated output.
    pub fn generated_len(&self) -> usize {
        match self {
            Chunk::Content(c) if c.removed => 0,
            Chunk::Content(c) => c.end - c.start,
            Chunk::Inserted(i) => i.payload.len(),
        }
    }
}
