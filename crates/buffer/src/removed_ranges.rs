// Chunk: docs/chunks/removed_ranges - Interval union of removed source ranges

//! The set of source ranges removed so far.
//!
//! Ranges are kept sorted, disjoint, and non-adjacent: inserting a range
//! that overlaps or touches existing ones merges them into a single covering
//! range. The set only ever grows.

use std::ops::Range;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RemovedRanges {
    ranges: Vec<Range<usize>>,
}

impl RemovedRanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Returns true if source byte `offset` has been removed.
    pub fn contains(&self, offset: usize) -> bool {
        let idx = self.ranges.partition_point(|r| r.end <= offset);
        self.ranges
            .get(idx)
            .is_some_and(|r| r.start <= offset)
    }

    /// Returns true if one merged range contains all of `range`.
    ///
    /// Empty ranges are never covered.
    pub fn covers(&self, range: &Range<usize>) -> bool {
        if range.is_empty() {
            return false;
        }
        let idx = self.ranges.partition_point(|r| r.end < range.end);
        self.ranges
            .get(idx)
            .is_some_and(|r| r.start <= range.start)
    }

    /// Merges `range` into the set.
    pub fn insert(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        // First range that overlaps or touches `range`, and one past the last.
        let lo = self.ranges.partition_point(|r| r.end < range.start);
        let hi = self.ranges.partition_point(|r| r.start <= range.end);

        let merged = if lo < hi {
            self.ranges[lo].start.min(range.start)..self.ranges[hi - 1].end.max(range.end)
        } else {
            range
        };
        self.ranges.splice(lo..hi, std::iter::once(merged));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ranges: &[Range<usize>]) -> RemovedRanges {
        let mut s = RemovedRanges::new();
        for r in ranges {
            s.insert(r.clone());
        }
        s
    }

    // ==================== Insert: merging ====================

    #[test]
    fn insert_into_empty() {
        let s = set(&[2..7]);
        assert_eq!(s.as_slice(), &[2..7]);
    }

    #[test]
    fn insert_empty_range_is_ignored() {
        let s = set(&[4..4]);
        assert!(s.as_slice().is_empty());
    }

    #[test]
    fn insert_subset_is_noop() {
        let s = set(&[2..7, 3..5]);
        assert_eq!(s.as_slice(), &[2..7]);
    }

    #[test]
    fn insert_overlapping_extends() {
        let s = set(&[2..7, 3..9]);
        assert_eq!(s.as_slice(), &[2..9]);
    }

    #[test]
    fn insert_adjacent_merges() {
        let s = set(&[5..10, 0..5]);
        assert_eq!(s.as_slice(), &[0..10]);
    }

    #[test]
    fn insert_disjoint_keeps_order() {
        let s = set(&[10..11, 2..9]);
        assert_eq!(s.as_slice(), &[2..9, 10..11]);
    }

    #[test]
    fn insert_spanning_several_collapses_them() {
        let s = set(&[2..9, 10..11, 14..16, 1..12]);
        assert_eq!(s.as_slice(), &[1..12, 14..16]);
    }

    #[test]
    fn insert_between_without_touching() {
        let s = set(&[0..2, 8..10, 4..6]);
        assert_eq!(s.as_slice(), &[0..2, 4..6, 8..10]);
    }

    // ==================== Queries ====================

    #[test]
    fn contains_respects_half_open_ends() {
        let s = set(&[2..5]);
        assert!(!s.contains(1));
        assert!(s.contains(2));
        assert!(s.contains(4));
        assert!(!s.contains(5));
    }

    #[test]
    fn covers_needs_a_single_range() {
        let s = set(&[0..3, 4..8]);
        assert!(s.covers(&(0..3)));
        assert!(s.covers(&(5..8)));
        assert!(!s.covers(&(2..5)));
        assert!(!s.covers(&(7..9)));
    }

    #[test]
    fn covers_empty_range_is_false() {
        let s = set(&[0..10]);
        assert!(!s.covers(&(3..3)));
    }
}
