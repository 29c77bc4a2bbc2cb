// Chunk: docs/chunks/splice_buffer - Non-destructive splice buffer over an immutable source

//! SpliceBuffer is the public API for recording edits against a source.
//!
//! It pairs a chunk list (the ordering of source slices and inserted
//! content) with the interval set of removed source ranges. All offsets are
//! in the coordinate space of the original source, so edits can be recorded
//! in any order.
//!
//! Each mutation validates everything up front and only then touches the
//! chunk list, so a rejected call leaves the buffer unchanged.

use std::fmt;
use std::io::{self, Write};
use std::ops::Range;

use crate::chunk::{InsertedChunk, Side};
use crate::chunk_list::ChunkList;
use crate::error::{Result, SpliceError};
use crate::removed_ranges::RemovedRanges;

/// A source plus the insertions and removals recorded against it.
#[derive(Debug, Clone)]
pub struct SpliceBuffer {
    source: Vec<u8>,
    chunks: ChunkList,
    removed: RemovedRanges,
    /// Mutation counter for sampling debug assertions (debug builds only).
    #[cfg(debug_assertions)]
    debug_mutation_count: u64,
}

impl SpliceBuffer {
    /// Creates a buffer over `source`. The source is never modified.
    pub fn new(source: impl Into<Vec<u8>>) -> Self {
        let source = source.into();
        let chunks = ChunkList::new(source.len());
        Self {
            source,
            chunks,
            removed: RemovedRanges::new(),
            #[cfg(debug_assertions)]
            debug_mutation_count: 0,
        }
    }

    // ==================== Accessors ====================

    /// Returns the length of the original source.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Returns true if the original source is empty.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Returns the original source.
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    /// Returns true if source byte `offset` has been removed.
    pub fn is_removed(&self, offset: usize) -> bool {
        self.removed.contains(offset)
    }

    /// Returns the removed source ranges, merged and sorted.
    pub fn removed_ranges(&self) -> &[Range<usize>] {
        self.removed.as_slice()
    }

    // ==================== Insertion ====================

    /// Inserts `content` at `offset`, glued to the content before it.
    ///
    /// Left inserts at one offset appear in call order, ahead of any right
    /// inserts there. With `essential`, the source byte before `offset` may
    /// never be removed.
    ///
    /// # Errors
    ///
    /// [`SpliceError::InvalidOffset`] if `offset > len()`, and
    /// [`SpliceError::EssentialAnchorUnavailable`] if `essential` is set and
    /// the byte before `offset` is already removed.
    pub fn insert_left(
        &mut self,
        offset: usize,
        content: impl Into<Vec<u8>>,
        essential: bool,
    ) -> Result<()> {
        self.insert(offset, content.into(), Side::Left, essential)
    }

    /// Inserts `content` at `offset`, glued to the content after it.
    ///
    /// Right inserts at one offset appear in call order, after any left
    /// inserts there. With `essential`, the source byte at `offset` may never
    /// be removed.
    ///
    /// # Errors
    ///
    /// [`SpliceError::InvalidOffset`] if `offset > len()`, and
    /// [`SpliceError::EssentialAnchorUnavailable`] if `essential` is set and
    /// the byte at `offset` is already removed.
    pub fn insert_right(
        &mut self,
        offset: usize,
        content: impl Into<Vec<u8>>,
        essential: bool,
    ) -> Result<()> {
        self.insert(offset, content.into(), Side::Right, essential)
    }

    fn insert(
        &mut self,
        offset: usize,
        payload: Vec<u8>,
        side: Side,
        essential: bool,
    ) -> Result<()> {
        if offset > self.len() {
            return Err(self.reject(SpliceError::InvalidOffset {
                offset,
                len: self.len(),
            }));
        }

        let anchor = side.anchor_at(offset, self.len());
        if essential && anchor.as_ref().is_some_and(|a| self.removed.contains(a.start)) {
            return Err(self.reject(SpliceError::EssentialAnchorUnavailable { offset, side }));
        }

        let payload_len = payload.len();
        self.chunks.thread(
            offset,
            InsertedChunk {
                payload,
                side,
                essential,
                anchor,
            },
        );

        tracing::trace!(
            offset,
            %side,
            essential,
            bytes = payload_len,
            chunks = self.chunks.len(),
            "inserted"
        );
        self.assert_chunks_consistent();
        Ok(())
    }

    // ==================== Removal ====================

    // Chunk: docs/chunks/removed_ranges - Interval union of removed source ranges
    /// Removes the source range `[offset, offset + length)`.
    ///
    /// Removal is an interval union: removing something already removed is a
    /// no-op, and overlapping removals extend the removed region. Inserted
    /// content is never removed, even when everything around it is.
    ///
    /// # Errors
    ///
    /// [`SpliceError::InvalidRange`] if the range does not fit in the source,
    /// and [`SpliceError::EssentialContentRemoved`] if the removal would take
    /// out the source byte an essential insertion is glued to (the leftmost
    /// such anchor is reported). Either way nothing is removed.
    pub fn remove(&mut self, offset: usize, length: usize) -> Result<()> {
        let range = self.checked_range(offset, length)?;
        if range.is_empty() || self.removed.covers(&range) {
            tracing::trace!(offset, length, "removal already covered");
            return Ok(());
        }

        // Chunk: docs/chunks/essential_insertions - Anchor protection for essential insertions
        let hit = self
            .chunks
            .protected_anchors()
            .find(|a| range.start < a.end && a.start < range.end)
            .cloned();
        if let Some(anchor) = hit {
            return Err(self.reject(SpliceError::EssentialContentRemoved {
                offset,
                length,
                anchor,
            }));
        }

        self.removed.insert(range.clone());
        let marked = self.chunks.mark_removed(range);
        tracing::trace!(
            offset,
            length,
            marked,
            chunks = self.chunks.len(),
            "removed"
        );
        self.assert_chunks_consistent();
        Ok(())
    }

    // Chunk: docs/chunks/edit_scripts - Serializable edit scripts
    /// Removes `[offset, offset + length)` and right-inserts `content` at
    /// `offset`, so the replacement takes the removed text's place.
    ///
    /// # Errors
    ///
    /// Same as [`remove`](Self::remove). A rejected removal inserts nothing.
    pub fn replace(
        &mut self,
        offset: usize,
        length: usize,
        content: impl Into<Vec<u8>>,
    ) -> Result<()> {
        self.remove(offset, length)?;
        self.insert(offset, content.into(), Side::Right, false)
    }

    fn checked_range(&self, offset: usize, length: usize) -> Result<Range<usize>> {
        match offset.checked_add(length) {
            Some(end) if end <= self.len() => Ok(offset..end),
            _ => Err(self.reject(SpliceError::InvalidRange {
                offset,
                length,
                len: self.len(),
            })),
        }
    }

    fn reject(&self, err: SpliceError) -> SpliceError {
        tracing::debug!(error = ?err, "rejected splice");
        err
    }

    // ==================== Generation ====================

    /// Produces the source with every recorded edit applied.
    ///
    /// Read-only: calling it repeatedly yields the same bytes until the next
    /// mutation.
    pub fn generate(&self) -> Vec<u8> {
        self.chunks.generate(&self.source)
    }

    /// Produces the generated output as a `String`.
    ///
    /// # Errors
    ///
    /// [`SpliceError::InvalidUtf8`] if an edit split a multi-byte character
    /// or a payload was not UTF-8.
    pub fn generate_string(&self) -> Result<String> {
        String::from_utf8(self.generate()).map_err(|e| SpliceError::InvalidUtf8 {
            valid_up_to: e.utf8_error().valid_up_to(),
        })
    }

    /// Streams the generated output into `out`.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.chunks.write_to(&self.source, out)
    }

    /// Returns the length `generate` would produce, without allocating.
    pub fn generated_len(&self) -> usize {
        self.chunks.generated_len()
    }

    // ==================== Validation ====================

    /// Debug assertion: verifies chunk-list structure and that the removed
    /// flags on content chunks agree with the removed interval set.
    ///
    /// Checks every 64th mutation so tight edit loops stay fast. Compiled out
    /// in release builds.
    #[cfg(debug_assertions)]
    fn assert_chunks_consistent(&mut self) {
        self.debug_mutation_count += 1;
        if self.debug_mutation_count % 64 != 0 {
            return;
        }
        if let Some(violation) = self.chunks.invariant_violation() {
            panic!(
                "chunk list corrupted after {} mutations: {}",
                self.debug_mutation_count, violation
            );
        }
        let removed_len: usize = self.removed.as_slice().iter().map(|r| r.len()).sum();
        assert_eq!(
            self.chunks.live_content_len(),
            self.source.len() - removed_len,
            "removed flags drifted from removed ranges after {} mutations\n  removed ranges: {:?}",
            self.debug_mutation_count,
            self.removed.as_slice(),
        );
    }

    #[cfg(not(debug_assertions))]
    fn assert_chunks_consistent(&mut self) {}
}

impl Default for SpliceBuffer {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<u8>> for SpliceBuffer {
    fn from(source: Vec<u8>) -> Self {
        Self::new(source)
    }
}

impl From<&[u8]> for SpliceBuffer {
    fn from(source: &[u8]) -> Self {
        Self::new(source)
    }
}

impl From<&str> for SpliceBuffer {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for SpliceBuffer {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}

/// Renders the generated output, replacing invalid UTF-8 lossily.
impl fmt::Display for SpliceBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.generate()))
    }
}
