//! Error types for luminosity record operations.

use thiserror::Error;

/// Errors that can occur when filling or reading a [`LumiDetails`](crate::LumiDetails).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LumiError {
    /// No data has ever been filled for this algorithm index.
    #[error("algorithm index {0} out of range: never filled")]
    AlgoNotFilled(usize),

    /// Position lies outside the algorithm's most recent segment.
    #[error("position {position} out of range for algorithm {algo} (segment length {len})")]
    PositionOutOfRange {
        /// Algorithm index.
        algo: usize,
        /// Requested position within the segment.
        position: usize,
        /// Length of the segment.
        len: usize,
    },

    /// The per-field input sequences given to a fill have different lengths.
    #[error("length mismatch in {field}: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Name of the offending field.
        field: &'static str,
        /// Length of the value sequence.
        expected: usize,
        /// Length of the offending sequence.
        actual: usize,
    },

    /// A segment reaches past the end of the stored arenas.
    #[error("segment of algorithm {algo} ({offset}+{len}) exceeds {stored} stored entries")]
    SegmentOutOfBounds {
        /// Algorithm index.
        algo: usize,
        /// Offset of the segment.
        offset: usize,
        /// Length of the segment.
        len: usize,
        /// Number of stored entries.
        stored: usize,
    },
}

impl LumiError {
    /// Creates a position-out-of-range error.
    #[must_use]
    pub const fn position(algo: usize, position: usize, len: usize) -> Self {
        Self::PositionOutOfRange {
            algo,
            position,
            len,
        }
    }

    /// Creates a length mismatch error.
    #[must_use]
    pub const fn length_mismatch(field: &'static str, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            field,
            expected,
            actual,
        }
    }

    /// Creates a segment-out-of-bounds error.
    #[must_use]
    pub const fn segment_out_of_bounds(
        algo: usize,
        offset: usize,
        len: usize,
        stored: usize,
    ) -> Self {
        Self::SegmentOutOfBounds {
            algo,
            offset,
            len,
            stored,
        }
    }

    /// Returns `true` for the out-of-range family (unfilled algorithm or bad position).
    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self, Self::AlgoNotFilled(_) | Self::PositionOutOfRange { .. })
    }
}

/// Result type for luminosity record operations.
pub type Result<T> = std::result::Result<T, LumiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_algo_not_filled() {
        let err = LumiError::AlgoNotFilled(4);
        let msg = err.to_string();
        assert!(msg.contains("out of range"));
        assert!(msg.contains('4'));
        assert!(err.is_out_of_range());
    }

    #[test]
    fn error_position() {
        let err = LumiError::position(2, 7, 3);
        let msg = format!("{err}");
        assert!(msg.contains("position 7"));
        assert!(msg.contains("algorithm 2"));
        assert!(msg.contains("length 3"));
        assert!(err.is_out_of_range());
    }

    #[test]
    fn error_length_mismatch() {
        let err = LumiError::length_mismatch("errors", 3, 2);
        let msg = err.to_string();
        assert!(msg.contains("errors"));
        assert!(msg.contains("expected 3"));
        assert!(!err.is_out_of_range());
    }

    #[test]
    fn error_segment_out_of_bounds() {
        let err = LumiError::segment_out_of_bounds(0, 0, 5, 1);
        let msg = err.to_string();
        assert!(msg.contains("algorithm 0"));
        assert!(msg.contains("exceeds 1 stored"));
        assert!(!err.is_out_of_range());
    }
}
