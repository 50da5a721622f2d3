//! Per-algorithm views into the flat field arenas.

use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Contiguous sub-range of the field arenas owned by one algorithm.
///
/// The same segment applies to all five arenas of a record, since a fill
/// appends the same number of entries to each of them.
///
/// # Example
///
/// ```
/// use lumi_types::AlgoSegment;
///
/// let seg = AlgoSegment::new(3, 2);
/// assert_eq!(seg.range(), 3..5);
/// assert_eq!(seg.end(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlgoSegment {
    /// Index of the first entry in the arenas.
    pub offset: usize,
    /// Number of entries.
    pub len: usize,
}

impl AlgoSegment {
    /// Creates a new segment.
    #[must_use]
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// One past the last entry.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Arena index range covered by this segment.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Checks if the segment has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Converts a position within the segment to an arena index.
    #[must_use]
    pub const fn arena_index(&self, position: usize) -> Option<usize> {
        if position < self.len {
            Some(self.offset + position)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_bounds() {
        let seg = AlgoSegment::new(4, 3);
        assert_eq!(seg.end(), 7);
        assert_eq!(seg.range(), 4..7);
        assert!(!seg.is_empty());
    }

    #[test]
    fn segment_arena_index() {
        let seg = AlgoSegment::new(4, 3);
        assert_eq!(seg.arena_index(0), Some(4));
        assert_eq!(seg.arena_index(2), Some(6));
        assert_eq!(seg.arena_index(3), None);
    }

    #[test]
    fn empty_segment() {
        let seg = AlgoSegment::new(10, 0);
        assert!(seg.is_empty());
        assert_eq!(seg.range(), 10..10);
        assert_eq!(seg.arena_index(0), None);
    }
}
