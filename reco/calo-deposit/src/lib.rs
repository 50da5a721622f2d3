//! Calorimeter particle deposits rebuilt from stored tables.
//!
//! Single-particle calibration studies store one row per particle with its
//! true energy, direction and the energies seen by the calorimeters. This
//! crate turns those rows back into deposit records:
//!
//! - [`DetectorElement`] - ECAL, HCAL or offset term with a calibration
//! - [`Deposition`] - Energy left in one element
//! - [`ParticleDeposit`] - All depositions of one particle
//! - [`DepositReconstructor`] - Reads a table and builds the deposits
//!
//! The columnar file reader stays outside this crate behind
//! [`TableReader`] and [`RowSource`].
//!
//! # Example
//!
//! ```
//! use calo_deposit::{
//!     DepositReconstructor, DetectorElement, DetectorElementType, InMemoryTables,
//!     SingleParticleRow, DEFAULT_TABLE,
//! };
//!
//! let mut tables = InMemoryTables::new();
//! tables.insert(DEFAULT_TABLE, vec![SingleParticleRow { true_energy: 20.0, ..Default::default() }]);
//!
//! let elements = [
//!     DetectorElement::new(DetectorElementType::Ecal, 1.0),
//!     DetectorElement::new(DetectorElementType::Hcal, 1.0),
//!     DetectorElement::new(DetectorElementType::Offset, 1.0),
//! ];
//! let deposits = DepositReconstructor::new(&elements)?.recreate(&mut tables)?;
//! assert_eq!(deposits[0].rec_depositions.len(), 3);
//! # Ok::<(), calo_deposit::DepositError>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod deposit;
mod element;
mod error;
mod reconstruct;
mod table;

pub use deposit::{Deposition, ParticleDeposit};
pub use element::{DetectorElement, DetectorElementType};
pub use error::{DepositError, Result};
pub use reconstruct::{DepositReconstructor, ReconstructConfig};
pub use table::{DEFAULT_TABLE, InMemoryTables, RowSource, SingleParticleRow, TableReader, VecRowSource};
