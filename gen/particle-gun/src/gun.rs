//! Particle gun replaying measured beam particles.
//!
//! Each generated event copies the particles of one randomly chosen entry
//! of a beam-line table. Table positions are in mm and momenta in MeV; the
//! generated particles use cm and GeV.

use nalgebra::Vector3;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{GunError, Result};
use crate::filter::ParticleFilterConfig;
use crate::particle::{GenParticle, ParticleDataTable};

/// Millimetre to centimetre.
pub const MM_TO_CM: f64 = 0.1;

/// MeV to GeV.
pub const MEV_TO_GEV: f64 = 0.001;

/// Configuration of the beam-momentum gun.
///
/// # Example
///
/// ```
/// use particle_gun::BeamGunConfig;
///
/// let config = BeamGunConfig::from_json(r#"{ "ZPosition": -800.0, "PartID": [211, -211] }"#).unwrap();
/// assert_eq!(config.z_position, -800.0);
/// assert_eq!(config.part_ids, vec![211, -211]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamGunConfig {
    /// Longitudinal position of every generated vertex, in cm.
    #[serde(rename = "ZPosition")]
    pub z_position: f64,

    /// Particle ids to generate; empty keeps every species.
    #[serde(rename = "PartID")]
    pub part_ids: Vec<i32>,

    /// Minimum polar angle of the momentum, in radians.
    #[serde(rename = "MinTheta")]
    pub min_theta: f64,

    /// Maximum polar angle of the momentum, in radians.
    #[serde(rename = "MaxTheta")]
    pub max_theta: f64,

    /// Seed for reproducible entry selection.
    #[serde(rename = "Seed", skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for BeamGunConfig {
    fn default() -> Self {
        Self {
            z_position: 0.0,
            part_ids: Vec::new(),
            min_theta: 0.0,
            max_theta: std::f64::consts::PI,
            seed: None,
        }
    }
}

impl BeamGunConfig {
    /// Parses the configuration from named parameters in JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`GunError::InvalidConfig`] for malformed JSON or an invalid
    /// angular window.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the vertex z position in cm.
    #[must_use]
    pub const fn with_z_position(mut self, z: f64) -> Self {
        self.z_position = z;
        self
    }

    /// Restricts generation to the given particle ids.
    #[must_use]
    pub fn with_part_ids(mut self, ids: Vec<i32>) -> Self {
        self.part_ids = ids;
        self
    }

    /// Sets the polar angle window.
    #[must_use]
    pub const fn with_theta_range(mut self, min: f64, max: f64) -> Self {
        self.min_theta = min;
        self.max_theta = max;
        self
    }

    /// Sets a random seed for reproducibility.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GunError::InvalidConfig`] if the theta window is outside
    /// `[0, pi]` or inverted, or the z position is not finite.
    pub fn validate(&self) -> Result<()> {
        let window_ok = self.min_theta >= 0.0
            && self.max_theta <= std::f64::consts::PI
            && self.min_theta <= self.max_theta;
        if !window_ok {
            return Err(GunError::invalid_config(format!(
                "theta window [{}, {}] is invalid",
                self.min_theta, self.max_theta
            )));
        }
        if !self.z_position.is_finite() {
            return Err(GunError::invalid_config("ZPosition must be finite"));
        }
        Ok(())
    }

    /// Creates the random generator: seeded if a seed is set, otherwise
    /// from the thread-local generator.
    #[must_use]
    pub fn make_rng(&self) -> Box<dyn RngCore> {
        match self.seed {
            Some(seed) => Box::new(rand::rngs::StdRng::seed_from_u64(seed)),
            None => Box::new(rand::thread_rng()),
        }
    }
}

/// One entry of the beam-line table: parallel per-particle arrays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BeamEntry {
    /// Event id of the measurement.
    pub event_id: i32,
    /// PDG ids.
    pub pdg_ids: Vec<i32>,
    /// x positions in mm.
    pub x: Vec<f32>,
    /// y positions in mm.
    pub y: Vec<f32>,
    /// z positions in mm.
    pub z: Vec<f32>,
    /// x momenta in MeV.
    pub px: Vec<f32>,
    /// y momenta in MeV.
    pub py: Vec<f32>,
    /// z momenta in MeV.
    pub pz: Vec<f32>,
}

impl BeamEntry {
    /// Number of particles in the entry.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.pdg_ids.len()
    }

    /// Checks that every per-particle array has one value per particle.
    ///
    /// # Errors
    ///
    /// Returns [`GunError::InconsistentEntry`] naming the first bad array.
    pub fn check(&self, entry: usize) -> Result<()> {
        let n = self.particle_count();
        for (name, len) in [
            ("x", self.x.len()),
            ("y", self.y.len()),
            ("z", self.z.len()),
            ("px", self.px.len()),
            ("py", self.py.len()),
            ("pz", self.pz.len()),
        ] {
            if len != n {
                return Err(GunError::inconsistent(
                    entry,
                    format!("{name} has {len} values, expected {n}"),
                ));
            }
        }
        Ok(())
    }
}

/// Particles generated for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenEvent {
    /// Event number assigned by the caller.
    pub event_number: u64,
    /// Index of the beam entry the particles were copied from.
    pub source_entry: usize,
    /// Event id stored in that beam entry.
    pub source_event_id: i32,
    /// Generated particles.
    pub particles: Vec<GenParticle>,
}

impl GenEvent {
    /// Returns a copy keeping only particles accepted by the filter.
    #[must_use]
    pub fn filtered(&self, filter: &ParticleFilterConfig) -> Self {
        Self {
            event_number: self.event_number,
            source_entry: self.source_entry,
            source_event_id: self.source_event_id,
            particles: self
                .particles
                .iter()
                .filter(|p| filter.accepts(p))
                .copied()
                .collect(),
        }
    }
}

/// Gun that replays particles from a beam-line table.
///
/// # Example
///
/// ```
/// use particle_gun::{BeamEntry, BeamGunConfig, BeamMomentumGun, StaticParticleTable};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let entry = BeamEntry {
///     event_id: 7,
///     pdg_ids: vec![211],
///     x: vec![10.0], y: vec![-5.0], z: vec![0.0],
///     px: vec![0.0], py: vec![0.0], pz: vec![50_000.0],
/// };
/// let gun = BeamMomentumGun::new(BeamGunConfig::default().with_z_position(-800.0), vec![entry])?;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let event = gun.produce(0, &StaticParticleTable::new(), &mut rng)?;
///
/// let pion = &event.particles[0];
/// assert_eq!(pion.vertex.x, 1.0);
/// assert_eq!(pion.vertex.z, -800.0);
/// assert_eq!(pion.momentum.z, 50.0);
/// # Ok::<(), particle_gun::GunError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BeamMomentumGun {
    config: BeamGunConfig,
    entries: Vec<BeamEntry>,
}

impl BeamMomentumGun {
    /// Creates a gun over the given beam entries.
    ///
    /// # Errors
    ///
    /// Returns [`GunError::NoEntries`] for an empty table,
    /// [`GunError::InconsistentEntry`] for a malformed entry, or
    /// [`GunError::InvalidConfig`] for an invalid configuration.
    pub fn new(config: BeamGunConfig, entries: Vec<BeamEntry>) -> Result<Self> {
        config.validate()?;
        if entries.is_empty() {
            return Err(GunError::NoEntries);
        }
        for (i, entry) in entries.iter().enumerate() {
            entry.check(i)?;
        }
        info!("Beam momentum gun loaded {} entries", entries.len());
        Ok(Self { config, entries })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &BeamGunConfig {
        &self.config
    }

    /// Number of beam entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Generates one event from a uniformly chosen beam entry.
    ///
    /// # Errors
    ///
    /// Returns [`GunError::UnknownParticle`] if a selected particle has no
    /// entry in the particle data table.
    pub fn produce<R: Rng + ?Sized>(
        &self,
        event_number: u64,
        table: &dyn ParticleDataTable,
        rng: &mut R,
    ) -> Result<GenEvent> {
        let index = rng.gen_range(0..self.entries.len());
        self.produce_from_entry(event_number, index, table)
    }

    /// Generates one event from a specific beam entry.
    ///
    /// # Errors
    ///
    /// Returns [`GunError::InconsistentEntry`] if `index` is past the end of
    /// the table, or [`GunError::UnknownParticle`] as for
    /// [`produce`](Self::produce).
    pub fn produce_from_entry(
        &self,
        event_number: u64,
        index: usize,
        table: &dyn ParticleDataTable,
    ) -> Result<GenEvent> {
        let entry = self
            .entries
            .get(index)
            .ok_or_else(|| GunError::inconsistent(index, "entry past end of table"))?;

        let mut particles = Vec::with_capacity(entry.particle_count());
        for (i, &pdg_id) in entry.pdg_ids.iter().enumerate() {
            if !self.config.part_ids.is_empty() && !self.config.part_ids.contains(&pdg_id) {
                continue;
            }

            let momentum = Vector3::new(
                f64::from(entry.px[i]),
                f64::from(entry.py[i]),
                f64::from(entry.pz[i]),
            ) * MEV_TO_GEV;
            let theta = momentum.x.hypot(momentum.y).atan2(momentum.z);
            if theta < self.config.min_theta || theta > self.config.max_theta {
                continue;
            }

            let properties = table
                .properties(pdg_id)
                .ok_or(GunError::UnknownParticle(pdg_id))?;
            let energy = momentum.norm().hypot(properties.mass);

            let vertex = Vector3::new(
                f64::from(entry.x[i]) * MM_TO_CM,
                f64::from(entry.y[i]) * MM_TO_CM,
                self.config.z_position,
            );

            particles.push(GenParticle {
                pdg_id,
                charge: properties.charge,
                momentum,
                energy,
                vertex,
            });
        }

        debug!(
            "Event {event_number}: entry {index} (id {}), {} of {} particles generated",
            entry.event_id,
            particles.len(),
            entry.particle_count()
        );

        Ok(GenEvent {
            event_number,
            source_entry: index,
            source_event_id: entry.event_id,
            particles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::StaticParticleTable;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;

    fn entry(event_id: i32, ids: &[i32], pz_mev: f32) -> BeamEntry {
        let n = ids.len();
        BeamEntry {
            event_id,
            pdg_ids: ids.to_vec(),
            x: vec![20.0; n],
            y: vec![-10.0; n],
            z: vec![500.0; n],
            px: vec![300.0; n],
            py: vec![400.0; n],
            pz: vec![pz_mev; n],
        }
    }

    #[test]
    fn config_defaults_and_json() {
        let config = BeamGunConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.part_ids.is_empty());

        let config = BeamGunConfig::from_json(r#"{ "MinTheta": 0.1, "MaxTheta": 0.5, "Seed": 9 }"#)
            .unwrap();
        assert_relative_eq!(config.min_theta, 0.1);
        assert_eq!(config.seed, Some(9));

        assert!(BeamGunConfig::from_json(r#"{ "MinTheta": 1.0, "MaxTheta": 0.5 }"#).is_err());
        assert!(BeamGunConfig::from_json(r#"{ "MaxTheta": 4.0 }"#).is_err());
    }

    #[test]
    fn new_rejects_empty_and_inconsistent() {
        assert!(matches!(
            BeamMomentumGun::new(BeamGunConfig::default(), Vec::new()),
            Err(GunError::NoEntries)
        ));

        let mut bad = entry(1, &[211, 211], 1000.0);
        bad.py.pop();
        let err = BeamMomentumGun::new(BeamGunConfig::default(), vec![entry(0, &[], 0.0), bad])
            .unwrap_err();
        assert!(matches!(err, GunError::InconsistentEntry { entry: 1, .. }));
        assert!(err.to_string().contains("py has 1 values"));
    }

    #[test]
    fn unit_conversion() {
        let gun = BeamMomentumGun::new(
            BeamGunConfig::default().with_z_position(-800.0),
            vec![entry(42, &[211], 1200.0)],
        )
        .unwrap();
        let event = gun
            .produce_from_entry(5, 0, &StaticParticleTable::new())
            .unwrap();

        assert_eq!(event.event_number, 5);
        assert_eq!(event.source_event_id, 42);
        let p = &event.particles[0];
        assert_relative_eq!(p.vertex.x, 2.0, epsilon = 1e-9);
        assert_relative_eq!(p.vertex.y, -1.0, epsilon = 1e-9);
        assert_relative_eq!(p.vertex.z, -800.0);
        assert_relative_eq!(p.momentum.x, 0.3, epsilon = 1e-9);
        assert_relative_eq!(p.momentum.y, 0.4, epsilon = 1e-9);
        assert_relative_eq!(p.momentum.z, 1.2, epsilon = 1e-9);
        assert_relative_eq!(p.pt(), 0.5, epsilon = 1e-9);
        assert_relative_eq!(p.charge, 1.0);

        let p2 = 0.5_f64 * 0.5 + 1.2 * 1.2;
        let m = 0.139_570_39_f64;
        assert_relative_eq!(p.energy, (p2 + m * m).sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn part_id_selection() {
        let gun = BeamMomentumGun::new(
            BeamGunConfig::default().with_part_ids(vec![PROTON]),
            vec![entry(1, &[211, PROTON, -211, PROTON], 5000.0)],
        )
        .unwrap();
        let event = gun
            .produce_from_entry(0, 0, &StaticParticleTable::new())
            .unwrap();
        assert_eq!(event.particles.len(), 2);
        assert!(event.particles.iter().all(|p| p.pdg_id == PROTON));
    }

    const PROTON: i32 = crate::particle::PROTON_ID;

    #[test]
    fn theta_window() {
        // pt = 0.5 GeV, pz = 5 GeV -> theta ~ 0.0997
        let table = StaticParticleTable::new();
        let inside = BeamMomentumGun::new(
            BeamGunConfig::default().with_theta_range(0.05, 0.15),
            vec![entry(1, &[211], 5000.0)],
        )
        .unwrap();
        assert_eq!(inside.produce_from_entry(0, 0, &table).unwrap().particles.len(), 1);

        let outside = BeamMomentumGun::new(
            BeamGunConfig::default().with_theta_range(0.2, 0.3),
            vec![entry(1, &[211], 5000.0)],
        )
        .unwrap();
        assert!(outside.produce_from_entry(0, 0, &table).unwrap().particles.is_empty());
    }

    #[test]
    fn unknown_particle() {
        let gun =
            BeamMomentumGun::new(BeamGunConfig::default(), vec![entry(1, &[999_999], 100.0)]).unwrap();
        let err = gun
            .produce_from_entry(0, 0, &StaticParticleTable::new())
            .unwrap_err();
        assert!(matches!(err, GunError::UnknownParticle(999_999)));
    }

    #[test]
    fn entry_past_end() {
        let gun = BeamMomentumGun::new(BeamGunConfig::default(), vec![entry(1, &[211], 1.0)]).unwrap();
        assert!(gun.produce_from_entry(0, 3, &StaticParticleTable::new()).is_err());
    }

    #[test]
    fn random_entry_reproducible_with_seed() {
        let entries: Vec<BeamEntry> = (0..20).map(|i| entry(i, &[211], 1000.0)).collect();
        let gun = BeamMomentumGun::new(BeamGunConfig::default().with_seed(12345), entries).unwrap();
        let table = StaticParticleTable::new();

        let mut rng_a = gun.config().make_rng();
        let mut rng_b = StdRng::seed_from_u64(12345);
        for n in 0..10 {
            let a = gun.produce(n, &table, &mut *rng_a).unwrap();
            let b = gun.produce(n, &table, &mut rng_b).unwrap();
            assert_eq!(a.source_entry, b.source_entry);
            assert!(a.source_entry < gun.entry_count());
        }
    }

    #[test]
    fn filtered_event() {
        let gun = BeamMomentumGun::new(
            BeamGunConfig::default(),
            vec![entry(1, &[211, 22], 1000.0)],
        )
        .unwrap();
        let event = gun
            .produce_from_entry(0, 0, &StaticParticleTable::new())
            .unwrap();

        let strict = ParticleFilterConfig::default().with_pt_min(1.0);
        let kept = event.filtered(&strict);
        assert_eq!(kept.particles.len(), 1);
        assert_eq!(kept.particles[0].pdg_id, 22);
        assert_eq!(kept.source_entry, event.source_entry);
    }
}
