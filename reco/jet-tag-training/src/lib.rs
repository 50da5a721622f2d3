//! Jet selection for b-tagging MVA training.
//!
//! For every event the trainer groups the tag infos of several collections
//! by jet, attaches the truth flavour, applies kinematic and flavour cuts
//! and hands the surviving jets' tagging variables to an MVA trainer:
//!
//! - [`TrainerConfig`] - Kinematic window, flavour lists, calibrations, inputs
//! - [`associate`] - Per-jet grouping of tag infos and flavour matches
//! - [`JetTagTrainer`] - Per-event selection and sample building
//! - [`TagComputer`] / [`MvaSink`] - The external computer and training engine
//!
//! # Sample Layout
//!
//! Every sample starts with [`TARGET_ID`] (1 for a signal flavour, 0
//! otherwise), [`JET_PT`] and [`JET_ETA`], followed by the computer's
//! tagging variables.
//!
//! # Quality Standards
//!
//! - Zero `unwrap`/`expect` in library code

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod association;
mod config;
mod error;
mod event;
mod trainer;

pub use association::{JetInfo, associate};
pub use config::{FlavourSet, TrainerConfig};
pub use error::{Result, TrainingError};
pub use event::{FlavourMatch, Jet, JetEvent, JetKey, TagInfo, TagInfoCollection, Variable, find_variable};
pub use trainer::{
    CategorySelector, DEFAULT_INPUT_LABEL, EventSummary, JET_ETA, JET_PT, JetTagTrainer, MvaSink,
    TARGET_ID, TagComputer, TagInfoHelper,
};
