//! Rebuilding particle deposits from a stored single-particle table.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::deposit::{Deposition, ParticleDeposit};
use crate::element::{DetectorElement, DetectorElementType};
use crate::error::{DepositError, Result};
use crate::table::{DEFAULT_TABLE, SingleParticleRow, TableReader};

/// Configuration for deposit reconstruction.
///
/// # Example
///
/// ```
/// use calo_deposit::ReconstructConfig;
///
/// let config = ReconstructConfig::from_json(r#"{ "treeName": "CaloData3" }"#).unwrap();
/// assert_eq!(config.table_name, "CaloData3");
/// assert_eq!(config.offset_energy, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructConfig {
    /// Name of the table to read.
    #[serde(rename = "treeName")]
    pub table_name: String,

    /// Energy given to the offset deposition of every particle.
    #[serde(rename = "offsetEnergy")]
    pub offset_energy: f64,
}

impl Default for ReconstructConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE.to_string(),
            offset_energy: 1.0,
        }
    }
}

impl ReconstructConfig {
    /// Parses a configuration from named parameters in JSON form.
    ///
    /// Omitted parameters take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`DepositError::InvalidConfig`] if the JSON is malformed or
    /// the resulting configuration is invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the table name.
    #[must_use]
    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = name.into();
        self
    }

    /// Sets the offset deposition energy.
    #[must_use]
    pub const fn with_offset_energy(mut self, energy: f64) -> Self {
        self.offset_energy = energy;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DepositError::InvalidConfig`] for an empty table name or a
    /// non-finite offset energy.
    pub fn validate(&self) -> Result<()> {
        if self.table_name.is_empty() {
            return Err(DepositError::invalid_config("table name must not be empty"));
        }
        if !self.offset_energy.is_finite() {
            return Err(DepositError::invalid_config("offset energy must be finite"));
        }
        Ok(())
    }
}

/// Rebuilds [`ParticleDeposit`]s from stored single-particle rows.
///
/// The element set must contain an ECAL and an HCAL element. An OFFSET
/// element is optional; without it no offset coefficient is added.
///
/// # Example
///
/// ```
/// use calo_deposit::{DepositReconstructor, InMemoryTables, SingleParticleRow, DEFAULT_TABLE};
///
/// let mut tables = InMemoryTables::new();
/// tables.insert(
///     DEFAULT_TABLE,
///     vec![SingleParticleRow { true_energy: 50.0, eta: 0.3, phi: 1.2, e_ecal: 10.0, e_hcal: 35.0 }],
/// );
///
/// let deposits = DepositReconstructor::with_default_elements()
///     .recreate(&mut tables)
///     .unwrap();
///
/// assert_eq!(deposits.len(), 1);
/// assert_eq!(deposits[0].rec_energy(), 45.0);
/// ```
#[derive(Debug, Clone)]
pub struct DepositReconstructor {
    ecal: DetectorElement,
    hcal: DetectorElement,
    offset: Option<DetectorElement>,
    config: ReconstructConfig,
}

impl DepositReconstructor {
    /// Creates a reconstructor from a set of detector elements.
    ///
    /// When an element kind appears more than once the last one is used.
    ///
    /// # Errors
    ///
    /// Returns [`DepositError::MissingElement`] if no ECAL or no HCAL
    /// element is supplied.
    pub fn new(elements: &[DetectorElement]) -> Result<Self> {
        let find = |kind: DetectorElementType| elements.iter().rev().find(|e| e.kind == kind).copied();

        let ecal = find(DetectorElementType::Ecal)
            .ok_or(DepositError::MissingElement(DetectorElementType::Ecal))?;
        let hcal = find(DetectorElementType::Hcal)
            .ok_or(DepositError::MissingElement(DetectorElementType::Hcal))?;
        let offset = find(DetectorElementType::Offset);

        if offset.is_none() {
            warn!("Offset element not found; no offset coefficient will be added to deposits");
        }
        debug!("Initialised detector elements: {ecal}, {hcal}");

        Ok(Self {
            ecal,
            hcal,
            offset,
            config: ReconstructConfig::default(),
        })
    }

    /// Creates a reconstructor with unit-calibrated ECAL and HCAL elements
    /// and no offset.
    #[must_use]
    pub fn with_default_elements() -> Self {
        Self {
            ecal: DetectorElement::new(DetectorElementType::Ecal, 1.0),
            hcal: DetectorElement::new(DetectorElementType::Hcal, 1.0),
            offset: None,
            config: ReconstructConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ReconstructConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ReconstructConfig {
        &self.config
    }

    /// Returns the offset element, if any.
    #[must_use]
    pub const fn offset(&self) -> Option<&DetectorElement> {
        self.offset.as_ref()
    }

    /// Builds the deposit for one row.
    #[must_use]
    pub fn deposit_for_row(&self, row: &SingleParticleRow) -> ParticleDeposit {
        let mut pd = ParticleDeposit::new(row.true_energy);

        if let Some(offset) = self.offset {
            let d = Deposition::new(offset, row.eta, row.phi, self.config.offset_energy);
            pd.add_rec_deposition(d);
            pd.add_truth_deposition(d);
        }

        let de = Deposition::new(self.ecal, row.eta, row.phi, row.e_ecal);
        let dh = Deposition::new(self.hcal, row.eta, row.phi, row.e_hcal);

        pd.add_rec_deposition(de);
        pd.add_rec_deposition(dh);
        // Truth is taken equal to the reconstructed depositions.
        pd.add_truth_deposition(de);
        pd.add_truth_deposition(dh);

        pd
    }

    /// Reads every entry of the configured table and builds its deposit.
    ///
    /// Deposits are returned in entry order.
    ///
    /// # Errors
    ///
    /// Returns [`DepositError::TableNotFound`] if the table does not exist,
    /// or the reader's error if an entry cannot be read.
    pub fn recreate(&self, reader: &mut dyn TableReader) -> Result<Vec<ParticleDeposit>> {
        self.config.validate()?;
        let name = self.config.table_name.as_str();

        let table = reader
            .open_table(name)
            .ok_or_else(|| DepositError::table_not_found(name))?;

        let entries = table.entry_count();
        info!("Opened table {name} with {entries} entries");

        let mut deposits = Vec::with_capacity(entries);
        for entry in 0..entries {
            let row = table.read_row(entry)?;
            let pd = self.deposit_for_row(&row);
            debug!("Entry {entry}: {pd}");
            deposits.push(pd);
        }

        info!("Rebuilt {} particle deposits", deposits.len());
        Ok(deposits)
    }
}
