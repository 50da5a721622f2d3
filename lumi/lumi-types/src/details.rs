//! The luminosity detail record.
//!
//! A [`LumiDetails`] holds, for each luminosity algorithm, five parallel
//! sequences: values, errors, quality flags and the two beam intensities.
//! The data of all algorithms lives in five flat append-only arenas; each
//! algorithm index maps to the [`AlgoSegment`] written by its most recent
//! fill.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algo::{ALGO_NAMES, NUM_ALGOS};
use crate::error::{LumiError, Result};
use crate::segment::AlgoSegment;

/// Version string of a record that has not been given a version.
pub const SENTINEL_VERSION: &str = "-1";

/// Per-algorithm luminosity details for one luminosity section.
///
/// # Filling
///
/// [`fill`](Self::fill) appends the five sequences for one algorithm to the
/// arenas and points that algorithm at the newly written range. Filling the
/// same algorithm again does not overwrite the earlier data: it is still
/// stored, but the accessors only see the latest fill.
///
/// # Example
///
/// ```
/// use lumi_types::LumiDetails;
///
/// let mut details = LumiDetails::with_version("v1");
/// details
///     .fill(2, &[1.0, 2.0, 3.0], &[0.1, 0.2, 0.3], &[7, 8, 9], &[10, 11, 12], &[13, 14, 15])
///     .unwrap();
///
/// assert!(details.is_valid());
/// assert_eq!(details.lumi_values_for_algo(2).unwrap(), &[1.0, 2.0, 3.0]);
/// assert_eq!(details.lumi_quality(2, 1).unwrap(), 8);
/// assert!(details.lumi_value(0, 0).is_err());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawLumiDetails")
)]
pub struct LumiDetails {
    version: String,
    values: Vec<f32>,
    errors: Vec<f32>,
    qualities: Vec<i16>,
    beam1_intensities: Vec<i16>,
    beam2_intensities: Vec<i16>,
    segments: BTreeMap<usize, AlgoSegment>,
}

impl LumiDetails {
    /// Creates an empty record with the sentinel version.
    #[must_use]
    pub fn new() -> Self {
        Self::with_version(SENTINEL_VERSION)
    }

    /// Creates an empty record with an explicit version.
    #[must_use]
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            values: Vec::new(),
            errors: Vec::new(),
            qualities: Vec::new(),
            beam1_intensities: Vec::new(),
            beam2_intensities: Vec::new(),
            segments: BTreeMap::new(),
        }
    }

    /// Returns `true` if the version has been set away from the sentinel.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.version != SENTINEL_VERSION
    }

    /// Returns the version string.
    #[must_use]
    pub fn lumi_version(&self) -> &str {
        &self.version
    }

    /// Overwrites the version string. The content is not validated.
    pub fn set_lumi_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    /// Returns the fixed list of algorithm names.
    ///
    /// The list is the same for every record and never changes.
    #[must_use]
    pub fn algo_names(&self) -> &'static [&'static str] {
        &ALGO_NAMES
    }

    /// Stores the data of one algorithm.
    ///
    /// All five sequences must have the same length. The algorithm index is
    /// not checked against [`NUM_ALGOS`].
    ///
    /// # Errors
    ///
    /// Returns [`LumiError::LengthMismatch`] if the sequence lengths differ.
    /// The record is left unchanged in that case.
    pub fn fill(
        &mut self,
        algo: usize,
        values: &[f32],
        errors: &[f32],
        qualities: &[i16],
        beam1_intensities: &[i16],
        beam2_intensities: &[i16],
    ) -> Result<()> {
        let len = values.len();
        for (field, actual) in [
            ("errors", errors.len()),
            ("qualities", qualities.len()),
            ("beam1Intensities", beam1_intensities.len()),
            ("beam2Intensities", beam2_intensities.len()),
        ] {
            if actual != len {
                return Err(LumiError::length_mismatch(field, len, actual));
            }
        }

        let segment = AlgoSegment::new(self.values.len(), len);

        self.values.extend_from_slice(values);
        self.errors.extend_from_slice(errors);
        self.qualities.extend_from_slice(qualities);
        self.beam1_intensities.extend_from_slice(beam1_intensities);
        self.beam2_intensities.extend_from_slice(beam2_intensities);

        if algo >= NUM_ALGOS {
            debug!("Filling algorithm index {algo} which has no name");
        }
        if let Some(previous) = self.segments.insert(algo, segment) {
            debug!(
                "Algorithm {algo} re-filled, previous segment {:?} kept in storage",
                previous.range()
            );
        }
        debug!("Filled algorithm {algo} with {len} entries at offset {}", segment.offset);

        Ok(())
    }

    /// Returns the most recent segment of an algorithm, if it was filled.
    #[must_use]
    pub fn segment(&self, algo: usize) -> Option<AlgoSegment> {
        self.segments.get(&algo).copied()
    }

    /// Checks if an algorithm has been filled at least once.
    #[must_use]
    pub fn is_filled(&self, algo: usize) -> bool {
        self.segments.contains_key(&algo)
    }

    /// Returns the filled algorithm indices in ascending order.
    pub fn filled_algos(&self) -> impl Iterator<Item = usize> + '_ {
        self.segments.keys().copied()
    }

    /// Number of entries stored in each arena, including superseded fills.
    #[must_use]
    pub fn stored_len(&self) -> usize {
        self.values.len()
    }

    /// Checks if nothing has been filled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn checked_segment(&self, algo: usize) -> Result<AlgoSegment> {
        self.segment(algo).ok_or(LumiError::AlgoNotFilled(algo))
    }

    fn slice_for<'a, T>(&self, arena: &'a [T], algo: usize) -> Result<&'a [T]> {
        let segment = self.checked_segment(algo)?;
        Ok(&arena[segment.range()])
    }

    fn element<T: Copy>(&self, arena: &[T], algo: usize, position: usize) -> Result<T> {
        let segment = self.checked_segment(algo)?;
        segment
            .arena_index(position)
            .map(|i| arena[i])
            .ok_or(LumiError::position(algo, position, segment.len))
    }

    /// Luminosity values of an algorithm's most recent fill.
    ///
    /// # Errors
    ///
    /// Returns [`LumiError::AlgoNotFilled`] if the algorithm was never filled.
    pub fn lumi_values_for_algo(&self, algo: usize) -> Result<&[f32]> {
        self.slice_for(&self.values, algo)
    }

    /// Luminosity errors of an algorithm's most recent fill.
    ///
    /// # Errors
    ///
    /// Returns [`LumiError::AlgoNotFilled`] if the algorithm was never filled.
    pub fn lumi_errors_for_algo(&self, algo: usize) -> Result<&[f32]> {
        self.slice_for(&self.errors, algo)
    }

    /// Quality flags of an algorithm's most recent fill.
    ///
    /// # Errors
    ///
    /// Returns [`LumiError::AlgoNotFilled`] if the algorithm was never filled.
    pub fn lumi_qualities_for_algo(&self, algo: usize) -> Result<&[i16]> {
        self.slice_for(&self.qualities, algo)
    }

    /// Beam 1 intensities of an algorithm's most recent fill.
    ///
    /// # Errors
    ///
    /// Returns [`LumiError::AlgoNotFilled`] if the algorithm was never filled.
    pub fn lumi_beam1_intensities_for_algo(&self, algo: usize) -> Result<&[i16]> {
        self.slice_for(&self.beam1_intensities, algo)
    }

    /// Beam 2 intensities of an algorithm's most recent fill.
    ///
    /// # Errors
    ///
    /// Returns [`LumiError::AlgoNotFilled`] if the algorithm was never filled.
    pub fn lumi_beam2_intensities_for_algo(&self, algo: usize) -> Result<&[i16]> {
        self.slice_for(&self.beam2_intensities, algo)
    }

    /// Single luminosity value.
    ///
    /// # Errors
    ///
    /// Returns an out-of-range error if the algorithm was never filled or
    /// the position is past the end of its segment.
    pub fn lumi_value(&self, algo: usize, position: usize) -> Result<f32> {
        self.element(&self.values, algo, position)
    }

    /// Single luminosity error.
    ///
    /// # Errors
    ///
    /// See [`lumi_value`](Self::lumi_value).
    pub fn lumi_error(&self, algo: usize, position: usize) -> Result<f32> {
        self.element(&self.errors, algo, position)
    }

    /// Single quality flag.
    ///
    /// # Errors
    ///
    /// See [`lumi_value`](Self::lumi_value).
    pub fn lumi_quality(&self, algo: usize, position: usize) -> Result<i16> {
        self.element(&self.qualities, algo, position)
    }

    /// Single beam 1 intensity.
    ///
    /// # Errors
    ///
    /// See [`lumi_value`](Self::lumi_value).
    pub fn lumi_beam1_intensity(&self, algo: usize, position: usize) -> Result<i16> {
        self.element(&self.beam1_intensities, algo, position)
    }

    /// Single beam 2 intensity.
    ///
    /// # Errors
    ///
    /// See [`lumi_value`](Self::lumi_value).
    pub fn lumi_beam2_intensity(&self, algo: usize, position: usize) -> Result<i16> {
        self.element(&self.beam2_intensities, algo, position)
    }

    /// Checks the storage invariants: all five arenas have the same length
    /// and every segment lies inside them.
    ///
    /// Records built through [`fill`](Self::fill) always pass.
    ///
    /// # Errors
    ///
    /// Returns [`LumiError::LengthMismatch`] for arenas of different lengths
    /// or [`LumiError::SegmentOutOfBounds`] for a segment past their end.
    pub fn validate(&self) -> Result<()> {
        let stored = self.values.len();
        for (field, actual) in [
            ("errors", self.errors.len()),
            ("qualities", self.qualities.len()),
            ("beam1Intensities", self.beam1_intensities.len()),
            ("beam2Intensities", self.beam2_intensities.len()),
        ] {
            if actual != stored {
                return Err(LumiError::length_mismatch(field, stored, actual));
            }
        }
        for (&algo, segment) in &self.segments {
            let inside = segment
                .offset
                .checked_add(segment.len)
                .is_some_and(|end| end <= stored);
            if !inside {
                return Err(LumiError::segment_out_of_bounds(
                    algo,
                    segment.offset,
                    segment.len,
                    stored,
                ));
            }
        }
        Ok(())
    }

    /// Deep comparison of two records.
    ///
    /// Compares the version, the algorithm names, the full contents of the
    /// five arenas and the segment of every filled algorithm. Floats are
    /// compared by bit pattern, so a record holding `NaN` equals itself and
    /// `0.0` differs from `-0.0`.
    #[must_use]
    pub fn is_product_equal(&self, other: &Self) -> bool {
        self.version == other.version
            && self.algo_names() == other.algo_names()
            && same_bits(&self.values, &other.values)
            && same_bits(&self.errors, &other.errors)
            && self.qualities == other.qualities
            && self.beam1_intensities == other.beam1_intensities
            && self.beam2_intensities == other.beam2_intensities
            && self.segments == other.segments
    }

    /// Renders a human-readable dump of the record.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Default for LumiDetails {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for LumiDetails {
    fn eq(&self, other: &Self) -> bool {
        self.is_product_equal(other)
    }
}

fn same_bits(a: &[f32], b: &[f32]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
}

/// Wire form of a record, checked before it becomes a [`LumiDetails`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawLumiDetails {
    version: String,
    values: Vec<f32>,
    errors: Vec<f32>,
    qualities: Vec<i16>,
    beam1_intensities: Vec<i16>,
    beam2_intensities: Vec<i16>,
    segments: BTreeMap<usize, AlgoSegment>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawLumiDetails> for LumiDetails {
    type Error = LumiError;

    fn try_from(raw: RawLumiDetails) -> Result<Self> {
        let details = Self {
            version: raw.version,
            values: raw.values,
            errors: raw.errors,
            qualities: raw.qualities,
            beam1_intensities: raw.beam1_intensities,
            beam2_intensities: raw.beam2_intensities,
            segments: raw.segments,
        };
        details.validate()?;
        Ok(details)
    }
}

fn write_seq<T: fmt::Display>(f: &mut fmt::Formatter<'_>, label: &str, seq: &[T]) -> fmt::Result {
    write!(f, "    {label} =")?;
    for x in seq {
        write!(f, " {x}")?;
    }
    writeln!(f)
}

impl fmt::Display for LumiDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LumiDetails")?;
        writeln!(f, "  lumiVersion = {}", self.version)?;
        writeln!(f, "  algoNames = {}", ALGO_NAMES.join(" "))?;
        for (&algo, segment) in &self.segments {
            let name = ALGO_NAMES.get(algo).copied().unwrap_or("(unnamed)");
            writeln!(
                f,
                "  algorithm {algo} {name}: offset {}, length {}",
                segment.offset, segment.len
            )?;
            let r = segment.range();
            write_seq(f, "values", &self.values[r.clone()])?;
            write_seq(f, "errors", &self.errors[r.clone()])?;
            write_seq(f, "qualities", &self.qualities[r.clone()])?;
            write_seq(f, "beam1Intensities", &self.beam1_intensities[r.clone()])?;
            write_seq(f, "beam2Intensities", &self.beam2_intensities[r])?;
        }
        writeln!(f, "  stored entries = {}", self.stored_len())?;
        write_seq(f, "values", &self.values)?;
        write_seq(f, "errors", &self.errors)?;
        write_seq(f, "qualities", &self.qualities)?;
        write_seq(f, "beam1Intensities", &self.beam1_intensities)?;
        write_seq(f, "beam2Intensities", &self.beam2_intensities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LumiAlgo;
    use approx::assert_relative_eq;

    /// Record filled the same way as the reference unit test.
    fn reference_record() -> LumiDetails {
        let mut d = LumiDetails::new();
        d.fill(
            2,
            &[1.0, 2.0, 3.0],
            &[4.0, 5.0, 6.0],
            &[7, 8, 9],
            &[10, 11, 12],
            &[13, 14, 15],
        )
        .unwrap();
        d.fill(0, &[1.0], &[4.0], &[7], &[10], &[113]).unwrap();
        d.fill(1, &[], &[], &[], &[], &[]).unwrap();

        let val3 = [11.0, 11.0];
        let err3 = [21.0, 21.0];
        let mut qual3 = [31, 31];
        let mut beam1_3 = [31, 31];
        let mut beam2_3 = [31, 31];
        d.fill(3, &val3, &err3, &qual3, &beam1_3, &beam2_3).unwrap();
        qual3 = [32, 33];
        d.fill(5, &val3, &err3, &qual3, &beam1_3, &beam2_3).unwrap();
        beam1_3[1] = 100;
        beam2_3[1] = 100;
        d.fill(4, &val3, &err3, &qual3, &beam1_3, &beam2_3).unwrap();
        d
    }

    #[test]
    fn default_construction() {
        let mut d = LumiDetails::default();
        assert_eq!(d.lumi_version(), "-1");
        assert!(!d.is_valid());
        assert!(d.is_empty());

        d.set_lumi_version("v1");
        assert!(d.is_valid());
        assert_eq!(d.lumi_version(), "v1");

        let d2 = LumiDetails::with_version("v2");
        assert_eq!(d2.lumi_version(), "v2");
        assert!(d2.is_valid());
    }

    #[test]
    fn setting_sentinel_invalidates() {
        let mut d = LumiDetails::with_version("v1");
        d.set_lumi_version(SENTINEL_VERSION);
        assert!(!d.is_valid());
    }

    #[test]
    fn algo_names_fixed() {
        let d = LumiDetails::new();
        let names = d.algo_names();
        assert_eq!(names, ["OCC1", "OCC2", "ET", "Algo3", "PLT1", "PLT2"]);
        assert_eq!(names.len(), 6);

        let filled = reference_record();
        assert_eq!(filled.algo_names(), names);
    }

    #[test]
    fn fill_and_read_ranges() {
        let d = reference_record();
        assert_eq!(d.lumi_values_for_algo(2).unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(d.lumi_errors_for_algo(2).unwrap(), &[4.0, 5.0, 6.0]);
        assert_eq!(d.lumi_qualities_for_algo(2).unwrap(), &[7, 8, 9]);
        assert_eq!(d.lumi_beam1_intensities_for_algo(2).unwrap(), &[10, 11, 12]);
        assert_eq!(d.lumi_beam2_intensities_for_algo(2).unwrap(), &[13, 14, 15]);
    }

    #[test]
    fn fill_and_read_elements() {
        let d = reference_record();
        for i in 0..3 {
            let k = i16::try_from(i).unwrap();
            assert_relative_eq!(d.lumi_value(2, i).unwrap(), 1.0 + f32::from(k));
            assert_relative_eq!(d.lumi_error(2, i).unwrap(), 4.0 + f32::from(k));
            assert_eq!(d.lumi_quality(2, i).unwrap(), 7 + k);
            assert_eq!(d.lumi_beam1_intensity(2, i).unwrap(), 10 + k);
            assert_eq!(d.lumi_beam2_intensity(2, i).unwrap(), 13 + k);
        }
    }

    #[test]
    fn out_of_order_fills_keep_their_own_data() {
        let d = reference_record();
        assert_eq!(d.lumi_beam2_intensities_for_algo(0).unwrap(), &[113]);
        assert!(d.lumi_values_for_algo(1).unwrap().is_empty());
        assert_eq!(d.lumi_qualities_for_algo(3).unwrap(), &[31, 31]);
        assert_eq!(d.lumi_qualities_for_algo(5).unwrap(), &[32, 33]);
        assert_eq!(d.lumi_beam1_intensities_for_algo(4).unwrap(), &[31, 100]);
        assert_eq!(d.lumi_beam2_intensities_for_algo(4).unwrap(), &[31, 100]);
        assert_eq!(d.filled_algos().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(d.stored_len(), 3 + 1 + 2 + 2 + 2);
    }

    #[test]
    fn refill_last_wins_storage_accumulates() {
        let mut d = LumiDetails::new();
        d.fill(3, &[1.0, 2.0], &[0.1, 0.2], &[1, 2], &[3, 4], &[5, 6])
            .unwrap();
        d.fill(3, &[9.0, 8.0, 7.0], &[0.9, 0.8, 0.7], &[9, 8, 7], &[6, 5, 4], &[3, 2, 1])
            .unwrap();

        assert_eq!(d.lumi_values_for_algo(3).unwrap(), &[9.0, 8.0, 7.0]);
        assert_eq!(d.lumi_beam2_intensities_for_algo(3).unwrap(), &[3, 2, 1]);
        assert_eq!(d.segment(3), Some(AlgoSegment::new(2, 3)));
        assert_eq!(d.stored_len(), 5);
    }

    #[test]
    fn unfilled_algo_is_out_of_range() {
        let d = reference_record();
        assert_eq!(d.lumi_values_for_algo(6), Err(LumiError::AlgoNotFilled(6)));
        assert!(d.lumi_errors_for_algo(42).unwrap_err().is_out_of_range());
        assert!(d.lumi_qualities_for_algo(42).is_err());
        assert!(d.lumi_beam1_intensities_for_algo(42).is_err());
        assert!(d.lumi_beam2_intensities_for_algo(42).is_err());
        assert!(d.lumi_value(42, 0).unwrap_err().is_out_of_range());

        let empty = LumiDetails::new();
        assert!(empty.lumi_beam2_intensity(LumiAlgo::Et.index(), 0).is_err());
    }

    #[test]
    fn position_past_segment_is_out_of_range() {
        let d = reference_record();
        assert_eq!(d.lumi_value(2, 3), Err(LumiError::position(2, 3, 3)));
        assert_eq!(d.lumi_quality(1, 0), Err(LumiError::position(1, 0, 0)));
        assert!(d.lumi_beam1_intensity(0, 1).unwrap_err().is_out_of_range());
    }

    #[test]
    fn length_mismatch_rejected_without_mutation() {
        let mut d = LumiDetails::new();
        let err = d
            .fill(0, &[1.0, 2.0], &[1.0, 2.0], &[1], &[1, 2], &[1, 2])
            .unwrap_err();
        assert_eq!(err, LumiError::length_mismatch("qualities", 2, 1));
        assert!(d.is_empty());
        assert_eq!(d.stored_len(), 0);

        let err = d.fill(0, &[], &[], &[], &[], &[7]).unwrap_err();
        assert!(matches!(
            err,
            LumiError::LengthMismatch {
                field: "beam2Intensities",
                ..
            }
        ));
    }

    #[test]
    fn unnamed_algo_index_accepted() {
        let mut d = LumiDetails::new();
        d.fill(17, &[0.5], &[0.05], &[1], &[2], &[3]).unwrap();
        assert!(d.is_filled(17));
        assert_relative_eq!(d.lumi_value(17, 0).unwrap(), 0.5);
    }

    #[test]
    fn product_equality() {
        let d = reference_record();
        assert!(d.is_product_equal(&d));
        assert!(!d.is_product_equal(&LumiDetails::new()));
        assert!(!LumiDetails::with_version("v1").is_product_equal(&LumiDetails::new()));
        assert_eq!(LumiDetails::new(), LumiDetails::new());
        assert_eq!(d.clone(), d);
    }

    #[test]
    fn equality_is_exact() {
        let mut a = LumiDetails::with_version("v1");
        let mut b = LumiDetails::with_version("v1");
        a.fill(0, &[1.0], &[0.0], &[0], &[0], &[0]).unwrap();
        b.fill(0, &[1.000_001], &[0.0], &[0], &[0], &[0]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn equality_sees_algorithm_index() {
        let mut a = LumiDetails::with_version("v1");
        let mut b = LumiDetails::with_version("v1");
        a.fill(0, &[1.0], &[0.1], &[1], &[2], &[3]).unwrap();
        b.fill(1, &[1.0], &[0.1], &[1], &[2], &[3]).unwrap();

        assert!(a.lumi_values_for_algo(0).is_ok());
        assert!(b.lumi_values_for_algo(0).is_err());
        assert!(!a.is_product_equal(&b));
        assert_ne!(a.render(), b.render());
    }

    #[test]
    fn equality_sees_superseded_data() {
        let mut a = LumiDetails::with_version("v1");
        let mut b = LumiDetails::with_version("v1");
        a.fill(0, &[1.0], &[0.0], &[0], &[0], &[0]).unwrap();
        b.fill(0, &[5.0], &[0.0], &[0], &[0], &[0]).unwrap();
        for d in [&mut a, &mut b] {
            d.fill(0, &[2.0], &[0.0], &[0], &[0], &[0]).unwrap();
        }

        assert_eq!(a.lumi_values_for_algo(0), b.lumi_values_for_algo(0));
        assert_ne!(a, b);
        assert_ne!(a.render(), b.render());
    }

    #[test]
    fn nan_record_equals_itself() {
        let mut d = LumiDetails::with_version("v1");
        d.fill(0, &[f32::NAN, 1.0], &[0.5, f32::NAN], &[0, 0], &[1, 1], &[2, 2])
            .unwrap();

        assert!(d.is_product_equal(&d));
        assert_eq!(d.clone(), d);
        assert_eq!(d.render(), d.clone().render());
        assert!(d.lumi_value(0, 0).unwrap().is_nan());
    }

    #[test]
    fn signed_zero_distinguished() {
        let mut a = LumiDetails::new();
        let mut b = LumiDetails::new();
        a.fill(0, &[0.0], &[0.0], &[0], &[0], &[0]).unwrap();
        b.fill(0, &[-0.0], &[0.0], &[0], &[0], &[0]).unwrap();
        assert_ne!(a, b);
        assert_ne!(a.render(), b.render());
    }

    #[test]
    fn filled_record_validates() {
        let d = reference_record();
        assert!(d.validate().is_ok());
        assert!(LumiDetails::new().validate().is_ok());
    }

    #[test]
    fn render_contents() {
        let mut d = reference_record();
        d.set_lumi_version("v1");
        let text = d.render();
        assert!(text.starts_with("LumiDetails\n"));
        assert!(text.contains("lumiVersion = v1"));
        assert!(text.contains("algoNames = OCC1 OCC2 ET Algo3 PLT1 PLT2"));
        assert!(text.contains("algorithm 2 ET: offset 0, length 3"));
        assert!(text.contains("values = 1 2 3"));
        assert!(text.contains("beam2Intensities = 113"));
        assert!(text.contains("beam1Intensities = 31 100"));
        assert!(text.contains("stored entries = 10"));
        assert_eq!(text, d.clone().render());
    }

    #[test]
    fn render_unnamed_algo() {
        let mut d = LumiDetails::new();
        d.fill(9, &[], &[], &[], &[], &[]).unwrap();
        assert!(d.render().contains("algorithm 9 (unnamed): offset 0, length 0"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn details_serialization() {
        let d = reference_record();
        let json = serde_json::to_string(&d).ok();
        assert!(json.is_some());

        let parsed: LumiDetails = serde_json::from_str(&json.unwrap_or_default()).unwrap();
        assert!(parsed.is_product_equal(&d));
        assert_eq!(parsed.segment(4), d.segment(4));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization_rejects_short_arena() {
        let json = r#"{
            "version": "v1",
            "values": [1.0],
            "errors": [],
            "qualities": [1],
            "beam1_intensities": [2],
            "beam2_intensities": [3],
            "segments": { "0": { "offset": 0, "len": 1 } }
        }"#;
        let err = serde_json::from_str::<LumiDetails>(json).unwrap_err();
        assert!(err.to_string().contains("length mismatch in errors"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization_rejects_segment_past_end() {
        let json = r#"{
            "version": "v1",
            "values": [1.0],
            "errors": [0.1],
            "qualities": [1],
            "beam1_intensities": [2],
            "beam2_intensities": [3],
            "segments": { "0": { "offset": 0, "len": 5 } }
        }"#;
        let err = serde_json::from_str::<LumiDetails>(json).unwrap_err();
        assert!(err.to_string().contains("exceeds 1 stored"));

        let overflow = json.replace(r#""offset": 0"#, &format!(r#""offset": {}"#, usize::MAX));
        assert!(serde_json::from_str::<LumiDetails>(&overflow).is_err());
    }
}
