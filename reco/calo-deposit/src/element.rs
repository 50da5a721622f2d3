//! Detector elements that receive energy depositions.

use serde::{Deserialize, Serialize};

/// Kind of detector element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectorElementType {
    /// Electromagnetic calorimeter.
    Ecal,
    /// Hadronic calorimeter.
    Hcal,
    /// Constant offset term of the calibration.
    Offset,
}

impl std::fmt::Display for DetectorElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Ecal => "ECAL",
            Self::Hcal => "HCAL",
            Self::Offset => "OFFSET",
        };
        f.write_str(name)
    }
}

/// A detector element with its calibration coefficient.
///
/// # Example
///
/// ```
/// use calo_deposit::{DetectorElement, DetectorElementType};
///
/// let ecal = DetectorElement::new(DetectorElementType::Ecal, 1.0);
/// assert_eq!(ecal.to_string(), "DetectorElement ECAL, calibration 1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorElement {
    /// Element kind.
    pub kind: DetectorElementType,
    /// Calibration coefficient applied to energies seen by this element.
    pub calibration: f64,
}

impl DetectorElement {
    /// Creates a detector element.
    #[must_use]
    pub const fn new(kind: DetectorElementType, calibration: f64) -> Self {
        Self { kind, calibration }
    }
}

impl std::fmt::Display for DetectorElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DetectorElement {}, calibration {}", self.kind, self.calibration)
    }
}
