// Chunk: docs/chunks/splice_buffer - Non-destructive splice buffer over an immutable source

//! Ordered chunk list backing a splice buffer.
//!
//! Content chunks tile the source `[0, len)` in order. Inserted chunks sit
//! between two content chunks, in the run that belongs to the boundary
//! offset they were inserted at. Within a run every `Left` insert precedes
//! every `Right` insert, and each side keeps call order.
//!
//! ```text
//!   [0,6) | L1 L2 R1 R2 | [6,11)
//!          ^-- boundary run at offset 6
//! ```
//!
//! Chunks are addressed by index into a `Vec`; splitting and threading are
//! index bookkeeping. Every operation is O(chunks).

use std::io::{self, Write};
use std::ops::Range;

use crate::chunk::{Chunk, ContentChunk, InsertedChunk, Side};

#[derive(Debug, Clone)]
pub(crate) struct ChunkList {
    chunks: Vec<Chunk>,
    /// Length of the source being tiled.
    source_len: usize,
}

impl ChunkList {
    /// Creates a list holding one content chunk over `[0, source_len)`.
    ///
    /// An empty source starts with no chunks at all.
    pub fn new(source_len: usize) -> Self {
        let chunks = if source_len == 0 {
            Vec::new()
        } else {
            vec![Chunk::Content(ContentChunk::new(0, source_len))]
        };
        Self { chunks, source_len }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    // ==================== Lookup ====================

    /// Index of the content chunk with `start <= offset < end`.
    fn content_index_containing(&self, offset: usize) -> Option<usize> {
        self.chunks.iter().position(|chunk| {
            chunk
                .as_content()
                .is_some_and(|c| c.start <= offset && offset < c.end)
        })
    }

    // ==================== Splitting ====================

    /// Ensures a chunk boundary exists at `offset` and returns the index of
    /// the content chunk that starts there, or `len()` when `offset` is the
    /// end of the source.
    ///
    /// Inserted chunks belonging to the boundary sit directly before the
    /// returned index.
    pub fn split_at(&mut self, offset: usize) -> usize {
        debug_assert!(offset <= self.source_len);
        for idx in 0..self.chunks.len() {
            let Chunk::Content(content) = &mut self.chunks[idx] else {
                continue;
            };
            if content.start == offset {
                return idx;
            }
            if content.splits_at(offset) {
                let tail = content.split_off(offset);
                self.chunks.insert(idx + 1, Chunk::Content(tail));
                return idx + 1;
            }
        }
        self.chunks.len()
    }

    /// Splits at `offset` only if the chunk containing it is still live.
    ///
    /// Removed chunks need no boundary of their own: their pieces would be
    /// removed either way.
    fn split_live_at(&mut self, offset: usize) {
        let live = self
            .content_index_containing(offset)
            .and_then(|idx| self.chunks[idx].as_content())
            .is_some_and(|c| !c.removed);
        if live {
            self.split_at(offset);
        }
    }

    // ==================== Insertion ====================

    /// Threads `inserted` into the boundary run at `offset`.
    ///
    /// `Right` inserts go to the end of the run. `Left` inserts go after the
    /// existing left inserts, ahead of the first right insert.
    pub fn thread(&mut self, offset: usize, inserted: InsertedChunk) {
        let boundary = self.split_at(offset);
        let at = match inserted.side {
            Side::Right => boundary,
            Side::Left => {
                let run = self.boundary_run(boundary);
                self.chunks[run.clone()]
                    .iter()
                    .position(|chunk| {
                        matches!(chunk, Chunk::Inserted(i) if i.side == Side::Right)
                    })
                    .map_or(boundary, |pos| run.start + pos)
            }
        };
        self.chunks.insert(at, Chunk::Inserted(inserted));
    }

    /// Indices of the inserted chunks directly before `boundary`.
    fn boundary_run(&self, boundary: usize) -> Range<usize> {
        let mut start = boundary;
        while start > 0 && self.chunks[start - 1].is_inserted() {
            start -= 1;
        }
        start..boundary
    }

    // ==================== Removal ====================

    /// Marks every content chunk inside `range` as removed, splitting live
    /// chunks at the range ends. Returns how many chunks changed state.
    pub fn mark_removed(&mut self, range: Range<usize>) -> usize {
        if range.is_empty() {
            return 0;
        }
        self.split_live_at(range.start);
        self.split_live_at(range.end);

        let mut marked = 0;
        for chunk in &mut self.chunks {
            if let Chunk::Content(c) = chunk {
                if !c.removed && range.start <= c.start && c.end <= range.end {
                    c.removed = true;
                    marked += 1;
                }
            }
        }
        marked
    }

    /// Anchor ranges of every essential insert, in list order.
    pub fn protected_anchors(&self) -> impl Iterator<Item = &Range<usize>> + '_ {
        self.chunks.iter().filter_map(|chunk| match chunk {
            Chunk::Inserted(i) => i.protected_anchor(),
            Chunk::Content(_) => None,
        })
    }

    // ==================== Generation ====================

    /// Total number of bytes `write_to` would produce.
    pub fn generated_len(&self) -> usize {
        self.chunks.iter().map(Chunk::generated_len).sum()
    }

    /// Number of source bytes not yet removed.
    #[cfg(any(test, debug_assertions))]
    pub fn live_content_len(&self) -> usize {
        self.chunks
            .iter()
            .filter_map(Chunk::as_content)
            .filter(|c| !c.removed)
            .map(|c| c.end - c.start)
            .sum()
    }

    /// Live source slices and inserted payloads, in list order.
    pub fn pieces<'a>(&'a self, source: &'a [u8]) -> impl Iterator<Item = &'a [u8]> + 'a {
        self.chunks.iter().filter_map(move |chunk| match chunk {
            Chunk::Content(c) if c.removed => None,
            Chunk::Content(c) => Some(&source[c.range()]),
            Chunk::Inserted(i) => Some(i.payload.as_slice()),
        })
    }

    /// Collects the generated output into a new vector.
    pub fn generate(&self, source: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.generated_len());
        for piece in self.pieces(source) {
            out.extend_from_slice(piece);
        }
        out
    }

    /// Writes the generated output into `out`.
    pub fn write_to<W: Write>(&self, source: &[u8], out: &mut W) -> io::Result<()> {
        for piece in self.pieces(source) {
            out.write_all(piece)?;
        }
        Ok(())
    }

    // ==================== Validation ====================

    /// Describes the first broken structural invariant, if any.
    ///
    /// Checks that content chunks are non-empty and tile `[0, source_len)`
    /// in order, and that every boundary run lists left inserts before right
    /// inserts.
    #[cfg(any(test, debug_assertions))]
    pub fn invariant_violation(&self) -> Option<String> {
        let mut expected_start = 0;
        let mut seen_right = false;
        for (idx, chunk) in self.chunks.iter().enumerate() {
            match chunk {
                Chunk::Content(c) => {
                    if c.start >= c.end {
                        return Some(format!("chunk {idx} is empty: {:?}", c.range()));
                    }
                    if c.start != expected_start {
                        return Some(format!(
                            "chunk {idx} starts at {} but {expected_start} was expected",
                            c.start
                        ));
                    }
                    expected_start = c.end;
                    seen_right = false;
                }
                Chunk::Inserted(i) => match i.side {
                    Side::Right => seen_right = true,
                    Side::Left if seen_right => {
                        return Some(format!("left insert at {idx} follows a right insert"));
                    }
                    Side::Left => {}
                },
            }
        }
        if expected_start != self.source_len {
            return Some(format!(
                "content ends at {expected_start} but source length is {}",
                self.source_len
            ));
        }
        None
    }
}
