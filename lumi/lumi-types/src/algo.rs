//! Luminosity algorithm slots.
//!
//! The set of algorithm names is fixed for every record; an algorithm is
//! addressed by its position in [`ALGO_NAMES`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of algorithm slots known to every record.
pub const NUM_ALGOS: usize = 6;

/// Names of the luminosity algorithms, indexed by algorithm slot.
pub const ALGO_NAMES: [&str; NUM_ALGOS] = ["OCC1", "OCC2", "ET", "Algo3", "PLT1", "PLT2"];

/// A named luminosity algorithm slot.
///
/// # Example
///
/// ```
/// use lumi_types::LumiAlgo;
///
/// assert_eq!(LumiAlgo::Et.index(), 2);
/// assert_eq!(LumiAlgo::Et.name(), "ET");
/// assert_eq!(LumiAlgo::from_name("PLT1"), Some(LumiAlgo::Plt1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LumiAlgo {
    /// HF occupancy, first ring set.
    Occ1,
    /// HF occupancy, second ring set.
    Occ2,
    /// HF transverse energy sum.
    Et,
    /// Spare slot.
    Algo3,
    /// Pixel luminosity telescope, first channel set.
    Plt1,
    /// Pixel luminosity telescope, second channel set.
    Plt2,
}

impl LumiAlgo {
    /// All algorithms in slot order.
    pub const ALL: [Self; NUM_ALGOS] = [
        Self::Occ1,
        Self::Occ2,
        Self::Et,
        Self::Algo3,
        Self::Plt1,
        Self::Plt2,
    ];

    /// Returns the slot index of this algorithm.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the fixed name of this algorithm.
    #[must_use]
    pub const fn name(self) -> &'static str {
        ALGO_NAMES[self as usize]
    }

    /// Looks up an algorithm by slot index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < NUM_ALGOS {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Looks up an algorithm by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        ALGO_NAMES
            .iter()
            .position(|n| *n == name)
            .and_then(Self::from_index)
    }
}

impl std::fmt::Display for LumiAlgo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<LumiAlgo> for usize {
    fn from(algo: LumiAlgo) -> Self {
        algo.index()
    }
}
