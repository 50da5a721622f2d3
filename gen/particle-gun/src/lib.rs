//! Beam-momentum particle gun and generator-level particle filter.
//!
//! - [`BeamMomentumGun`] - Replays particles of a measured beam-line table,
//!   one randomly chosen entry per event
//! - [`ParticleFilterConfig`] - Kinematic cuts on generated particles
//! - [`ParticleDataTable`] - Mass and charge lookup by PDG id
//!
//! # Units
//!
//! Beam tables are read in mm and MeV. Generated particles carry cm and
//! GeV, the units of the detector simulation.
//!
//! # Example
//!
//! ```
//! use particle_gun::{
//!     BeamEntry, BeamGunConfig, BeamMomentumGun, ParticleFilterConfig, StaticParticleTable,
//! };
//!
//! let entry = BeamEntry {
//!     event_id: 1,
//!     pdg_ids: vec![211, 22],
//!     x: vec![0.0; 2], y: vec![0.0; 2], z: vec![0.0; 2],
//!     px: vec![300.0, 10.0], py: vec![400.0, 0.0], pz: vec![2000.0, 20.0],
//! };
//! let config = BeamGunConfig::default().with_seed(3);
//! let gun = BeamMomentumGun::new(config, vec![entry])?;
//!
//! let mut rng = gun.config().make_rng();
//! let event = gun.produce(0, &StaticParticleTable::new(), &mut *rng)?;
//! assert_eq!(event.particles.len(), 2);
//!
//! // The 22 MeV photon falls below the default energy cut.
//! let kept = event.filtered(&ParticleFilterConfig::default());
//! assert_eq!(kept.particles.len(), 1);
//! # Ok::<(), particle_gun::GunError>(())
//! ```
//!
//! # Quality Standards
//!
//! - Zero `unwrap`/`expect` in library code
//! - Unknown species are errors, never massless defaults

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod filter;
mod gun;
mod particle;

pub use error::{GunError, Result};
pub use filter::ParticleFilterConfig;
pub use gun::{BeamEntry, BeamGunConfig, BeamMomentumGun, GenEvent, MEV_TO_GEV, MM_TO_CM};
pub use particle::{
    GenParticle, PROTON_ID, ParticleDataTable, ParticleProperties, StaticParticleTable,
};
