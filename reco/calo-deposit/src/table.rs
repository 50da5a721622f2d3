//! Row-oriented access to stored single-particle tables.
//!
//! The columnar file reader is external; reconstruction only needs the
//! narrow contract of [`TableReader`] and [`RowSource`]. [`InMemoryTables`]
//! implements both over plain vectors.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::{DepositError, Result};

/// Name of the table holding single-particle calorimeter data.
pub const DEFAULT_TABLE: &str = "CaloData2";

/// One stored single-particle entry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SingleParticleRow {
    /// True particle energy in GeV.
    pub true_energy: f64,
    /// Pseudorapidity.
    pub eta: f64,
    /// Azimuth in radians.
    pub phi: f64,
    /// Energy measured in the electromagnetic calorimeter.
    pub e_ecal: f64,
    /// Energy measured in the hadronic calorimeter.
    pub e_hcal: f64,
}

/// Sequential reader over the entries of one table.
pub trait RowSource {
    /// Number of entries in the table.
    fn entry_count(&self) -> usize;

    /// Reads an entry into typed fields.
    ///
    /// # Errors
    ///
    /// Returns [`DepositError::ReadRow`] if the entry cannot be decoded.
    fn read_row(&mut self, entry: usize) -> Result<SingleParticleRow>;
}

/// Source of named tables.
pub trait TableReader {
    /// Opens a table by name, or `None` if it does not exist.
    fn open_table(&mut self, name: &str) -> Option<&mut dyn RowSource>;

    /// Names of the available tables.
    fn table_names(&self) -> Vec<String>;
}

/// A table held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VecRowSource {
    rows: Vec<SingleParticleRow>,
}

impl VecRowSource {
    /// Creates a table from rows.
    #[must_use]
    pub const fn new(rows: Vec<SingleParticleRow>) -> Self {
        Self { rows }
    }
}

impl RowSource for VecRowSource {
    fn entry_count(&self) -> usize {
        self.rows.len()
    }

    fn read_row(&mut self, entry: usize) -> Result<SingleParticleRow> {
        self.rows
            .get(entry)
            .copied()
            .ok_or_else(|| DepositError::read_row(entry, "entry past end of table"))
    }
}

/// A set of named in-memory tables.
///
/// # Example
///
/// ```
/// use calo_deposit::{DEFAULT_TABLE, InMemoryTables, RowSource, SingleParticleRow, TableReader};
///
/// let mut tables = InMemoryTables::new();
/// tables.insert(DEFAULT_TABLE, vec![SingleParticleRow::default()]);
///
/// let table = tables.open_table(DEFAULT_TABLE).unwrap();
/// assert_eq!(table.entry_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTables {
    tables: HashMap<String, VecRowSource>,
}

impl InMemoryTables {
    /// Creates an empty set of tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a table.
    pub fn insert(&mut self, name: impl Into<String>, rows: Vec<SingleParticleRow>) {
        self.tables.insert(name.into(), VecRowSource::new(rows));
    }
}

impl TableReader for InMemoryTables {
    fn open_table(&mut self, name: &str) -> Option<&mut dyn RowSource> {
        self.tables
            .get_mut(name)
            .map(|t| t as &mut dyn RowSource)
    }

    fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        names
    }
}
