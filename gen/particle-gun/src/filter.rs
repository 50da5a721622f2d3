//! Generator-level particle filter.
//!
//! Decides which generated particles are passed on to the detector
//! simulation.

use serde::{Deserialize, Serialize};

use crate::error::{GunError, Result};
use crate::particle::{GenParticle, PROTON_ID};

/// Kinematic cuts applied to generated particles.
///
/// # Example
///
/// ```
/// use particle_gun::ParticleFilterConfig;
///
/// let filter = ParticleFilterConfig::from_json(r#"{ "etaMax": 3.0 }"#).unwrap();
/// assert_eq!(filter.eta_max, 3.0);
/// assert_eq!(filter.e_proton, 5000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleFilterConfig {
    /// Protons above this energy (GeV) are always kept.
    #[serde(rename = "EProton")]
    pub e_proton: f64,

    /// Particles with |eta| above this are not simulated.
    #[serde(rename = "etaMax")]
    pub eta_max: f64,

    /// Charged particles below this transverse momentum (GeV) are not simulated.
    #[serde(rename = "pTMin")]
    pub pt_min: f64,

    /// Particles below this energy (GeV) are not simulated.
    #[serde(rename = "EMin")]
    pub e_min: f64,
}

impl Default for ParticleFilterConfig {
    fn default() -> Self {
        Self {
            e_proton: 5000.0,
            eta_max: 5.0,
            pt_min: 0.2,
            e_min: 0.1,
        }
    }
}

impl ParticleFilterConfig {
    /// Parses the filter from named parameters in JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`GunError::InvalidConfig`] for malformed JSON or invalid cuts.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the pseudorapidity cut.
    #[must_use]
    pub const fn with_eta_max(mut self, eta_max: f64) -> Self {
        self.eta_max = eta_max;
        self
    }

    /// Sets the charged-particle transverse momentum cut.
    #[must_use]
    pub const fn with_pt_min(mut self, pt_min: f64) -> Self {
        self.pt_min = pt_min;
        self
    }

    /// Sets the energy cut.
    #[must_use]
    pub const fn with_e_min(mut self, e_min: f64) -> Self {
        self.e_min = e_min;
        self
    }

    /// Validates the cuts.
    ///
    /// # Errors
    ///
    /// Returns [`GunError::InvalidConfig`] if a cut is negative or `NaN`.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("EProton", self.e_proton),
            ("etaMax", self.eta_max),
            ("pTMin", self.pt_min),
            ("EMin", self.e_min),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(GunError::invalid_config(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Whether a particle passes the filter.
    #[must_use]
    pub fn accepts(&self, particle: &GenParticle) -> bool {
        if particle.pdg_id.abs() == PROTON_ID && particle.energy > self.e_proton {
            return true;
        }
        if particle.eta().abs() > self.eta_max {
            return false;
        }
        if particle.is_charged() && particle.pt() < self.pt_min {
            return false;
        }
        particle.energy >= self.e_min
    }
}
