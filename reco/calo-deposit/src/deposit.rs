//! Energy depositions and per-particle deposit records.

use serde::{Deserialize, Serialize};

use crate::element::{DetectorElement, DetectorElementType};

/// Energy deposited by a particle in one detector element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deposition {
    /// Element that received the energy.
    pub element: DetectorElement,
    /// Pseudorapidity of the particle.
    pub eta: f64,
    /// Azimuth of the particle in radians.
    pub phi: f64,
    /// Deposited energy in GeV.
    pub energy: f64,
}

impl Deposition {
    /// Creates a deposition.
    #[must_use]
    pub const fn new(element: DetectorElement, eta: f64, phi: f64, energy: f64) -> Self {
        Self {
            element,
            eta,
            phi,
            energy,
        }
    }
}

/// Depositions left by one particle of known true energy.
///
/// Reconstructed depositions are what a well-calibrated element should
/// detect, detector effects included. Truth depositions are the simulated
/// energy actually deposited.
///
/// # Example
///
/// ```
/// use calo_deposit::{Deposition, DetectorElement, DetectorElementType, ParticleDeposit};
///
/// let ecal = DetectorElement::new(DetectorElementType::Ecal, 1.0);
/// let mut pd = ParticleDeposit::new(50.0);
/// pd.add_rec_deposition(Deposition::new(ecal, 0.5, 1.0, 42.0));
///
/// assert_eq!(pd.rec_energy(), 42.0);
/// assert_eq!(pd.truth_energy(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParticleDeposit {
    /// True energy of the particle in GeV.
    pub true_energy: f64,
    /// Reconstructed depositions.
    pub rec_depositions: Vec<Deposition>,
    /// Truth depositions.
    pub truth_depositions: Vec<Deposition>,
}

impl ParticleDeposit {
    /// Creates a deposit with no depositions.
    #[must_use]
    pub const fn new(true_energy: f64) -> Self {
        Self {
            true_energy,
            rec_depositions: Vec::new(),
            truth_depositions: Vec::new(),
        }
    }

    /// Adds a reconstructed deposition.
    pub fn add_rec_deposition(&mut self, deposition: Deposition) {
        self.rec_depositions.push(deposition);
    }

    /// Adds a truth deposition.
    pub fn add_truth_deposition(&mut self, deposition: Deposition) {
        self.truth_depositions.push(deposition);
    }

    /// Sum of reconstructed deposited energy.
    #[must_use]
    pub fn rec_energy(&self) -> f64 {
        self.rec_depositions.iter().map(|d| d.energy).sum()
    }

    /// Sum of truth deposited energy.
    #[must_use]
    pub fn truth_energy(&self) -> f64 {
        self.truth_depositions.iter().map(|d| d.energy).sum()
    }

    /// Reconstructed energy seen by elements of one kind.
    #[must_use]
    pub fn rec_energy_in(&self, kind: DetectorElementType) -> f64 {
        self.rec_depositions
            .iter()
            .filter(|d| d.element.kind == kind)
            .map(|d| d.energy)
            .sum()
    }
}

impl std::fmt::Display for ParticleDeposit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "ParticleDeposit: true energy {}", self.true_energy)?;
        for d in &self.rec_depositions {
            writeln!(
                f,
                "  rec   {} eta {:.3} phi {:.3} energy {:.3}",
                d.element.kind, d.eta, d.phi, d.energy
            )?;
        }
        for d in &self.truth_depositions {
            writeln!(
                f,
                "  truth {} eta {:.3} phi {:.3} energy {:.3}",
                d.element.kind, d.eta, d.phi, d.energy
            )?;
        }
        Ok(())
    }
}
