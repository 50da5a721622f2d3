//! Luminosity detail records.
//!
//! This crate provides the per-algorithm luminosity record attached to a
//! luminosity section:
//!
//! - [`LumiDetails`] - Version tag plus five per-algorithm sequences
//!   (value, error, quality flag, beam 1 and beam 2 intensity)
//! - [`LumiAlgo`] - The fixed set of named algorithm slots
//! - [`AlgoSegment`] - View of one algorithm's data in the flat storage
//!
//! # Layer 0 Crate
//!
//! Plain in-memory data with no framework, database or file-format
//! dependencies. Persistence and lookup by run/section belong to the
//! conditions store that consumes these records.
//!
//! # Storage Model
//!
//! Each field is a flat append-only arena shared by all algorithms. A fill
//! appends one algorithm's data to every arena and points the algorithm at
//! the new range; earlier fills of the same algorithm remain stored but are
//! no longer visible through the accessors.
//!
//! # Example
//!
//! ```
//! use lumi_types::{LumiAlgo, LumiDetails};
//!
//! let mut details = LumiDetails::new();
//! assert!(!details.is_valid());
//! details.set_lumi_version("v1");
//!
//! details
//!     .fill(LumiAlgo::Occ1.index(), &[0.9], &[0.01], &[1], &[120], &[118])
//!     .unwrap();
//!
//! assert_eq!(details.lumi_beam1_intensity(0, 0).unwrap(), 120);
//! assert!(details.is_product_equal(&details.clone()));
//! ```
//!
//! # Quality Standards
//!
//! - Zero `unwrap`/`expect` in library code
//! - Out-of-range reads are errors, never default values

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod algo;
mod details;
mod error;
mod segment;

pub use algo::{ALGO_NAMES, LumiAlgo, NUM_ALGOS};
pub use details::{LumiDetails, SENTINEL_VERSION};
pub use error::{LumiError, Result};
pub use segment::AlgoSegment;
