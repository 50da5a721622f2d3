//! Generator-level particles and particle data.

use hashbrown::HashMap;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// PDG id of the proton.
pub const PROTON_ID: i32 = 2212;

/// A generated particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenParticle {
    /// PDG particle id.
    pub pdg_id: i32,
    /// Electric charge in units of the elementary charge.
    pub charge: f64,
    /// Momentum in GeV.
    pub momentum: Vector3<f64>,
    /// Energy in GeV.
    pub energy: f64,
    /// Production vertex in cm.
    pub vertex: Vector3<f64>,
}

impl GenParticle {
    /// Transverse momentum.
    #[must_use]
    pub fn pt(&self) -> f64 {
        self.momentum.x.hypot(self.momentum.y)
    }

    /// Polar angle of the momentum in radians.
    #[must_use]
    pub fn theta(&self) -> f64 {
        self.pt().atan2(self.momentum.z)
    }

    /// Pseudorapidity of the momentum.
    ///
    /// Infinite for a momentum along the beam axis.
    #[must_use]
    pub fn eta(&self) -> f64 {
        let pt = self.pt();
        if pt == 0.0 {
            return if self.momentum.z >= 0.0 {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            };
        }
        (self.momentum.z / pt).asinh()
    }

    /// Whether the particle carries electric charge.
    #[must_use]
    pub fn is_charged(&self) -> bool {
        self.charge != 0.0
    }
}

/// Mass and charge of a particle species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleProperties {
    /// Mass in GeV.
    pub mass: f64,
    /// Electric charge in units of the elementary charge.
    pub charge: f64,
}

/// Lookup of particle properties by PDG id.
pub trait ParticleDataTable {
    /// Properties of a species, or `None` if unknown.
    fn properties(&self, pdg_id: i32) -> Option<ParticleProperties>;
}

/// A fixed table of common species.
///
/// Negative ids resolve to the antiparticle of a listed positive id, with
/// the charge flipped. Self-conjugate species are listed once.
///
/// # Example
///
/// ```
/// use particle_gun::{ParticleDataTable, StaticParticleTable};
///
/// let table = StaticParticleTable::new();
/// let pi_minus = table.properties(-211).unwrap();
/// assert_eq!(pi_minus.charge, -1.0);
/// assert!(table.properties(999_999).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct StaticParticleTable {
    species: HashMap<i32, ParticleProperties>,
}

impl StaticParticleTable {
    /// Creates the table of common species.
    #[must_use]
    pub fn new() -> Self {
        let entries: [(i32, f64, f64); 14] = [
            (11, 0.000_510_998_95, -1.0),
            (12, 0.0, 0.0),
            (13, 0.105_658_375_5, -1.0),
            (14, 0.0, 0.0),
            (15, 1.776_86, -1.0),
            (16, 0.0, 0.0),
            (22, 0.0, 0.0),
            (111, 0.134_976_8, 0.0),
            (130, 0.497_611, 0.0),
            (211, 0.139_570_39, 1.0),
            (310, 0.497_611, 0.0),
            (321, 0.493_677, 1.0),
            (2112, 0.939_565_420_52, 0.0),
            (PROTON_ID, 0.938_272_088_16, 1.0),
        ];
        let species = entries
            .into_iter()
            .map(|(id, mass, charge)| (id, ParticleProperties { mass, charge }))
            .collect();
        Self { species }
    }

    /// Adds or replaces a species.
    pub fn insert(&mut self, pdg_id: i32, properties: ParticleProperties) {
        self.species.insert(pdg_id, properties);
    }
}

impl Default for StaticParticleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleDataTable for StaticParticleTable {
    fn properties(&self, pdg_id: i32) -> Option<ParticleProperties> {
        if let Some(p) = self.species.get(&pdg_id) {
            return Some(*p);
        }
        if pdg_id < 0 {
            // Antiparticles only exist for charged or non-self-conjugate species.
            let p = self.species.get(&pdg_id.checked_neg()?)?;
            let self_conjugate = matches!(pdg_id.abs(), 22 | 111 | 130 | 310);
            if self_conjugate {
                return None;
            }
            return Some(ParticleProperties {
                mass: p.mass,
                charge: -p.charge,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn particle(px: f64, py: f64, pz: f64) -> GenParticle {
        GenParticle {
            pdg_id: 211,
            charge: 1.0,
            momentum: Vector3::new(px, py, pz),
            energy: (px * px + py * py + pz * pz).sqrt(),
            vertex: Vector3::zeros(),
        }
    }

    #[test]
    fn kinematics() {
        let p = particle(3.0, 4.0, 0.0);
        assert_relative_eq!(p.pt(), 5.0);
        assert_relative_eq!(p.eta(), 0.0);
        assert_relative_eq!(p.theta(), std::f64::consts::FRAC_PI_2);

        let forward = particle(1.0, 0.0, 1.0);
        assert_relative_eq!(forward.eta(), 1.0_f64.asinh());
        assert_relative_eq!(forward.theta(), std::f64::consts::FRAC_PI_4);
    }

    #[test]
    fn eta_along_beam() {
        assert!(particle(0.0, 0.0, 10.0).eta().is_infinite());
        assert!(particle(0.0, 0.0, -10.0).eta() < 0.0);
    }

    #[test]
    fn table_lookup() {
        let table = StaticParticleTable::new();
        let proton = table.properties(PROTON_ID).unwrap();
        assert_relative_eq!(proton.mass, 0.938_272_088_16);
        assert_relative_eq!(proton.charge, 1.0);

        let antiproton = table.properties(-PROTON_ID).unwrap();
        assert_relative_eq!(antiproton.charge, -1.0);

        let positron = table.properties(-11).unwrap();
        assert_relative_eq!(positron.charge, 1.0);

        assert!(table.properties(-22).is_none());
        assert!(table.properties(i32::MIN).is_none());
    }

    #[test]
    fn table_insert() {
        let mut table = StaticParticleTable::new();
        table.insert(
            3122,
            ParticleProperties {
                mass: 1.115_683,
                charge: 0.0,
            },
        );
        assert!(table.properties(3122).is_some());
        assert!(table.properties(-3122).is_some());
    }
}
