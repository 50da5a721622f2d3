//! Trainer configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrainingError};

/// Configuration of a jet-tag trainer.
///
/// Field names in serialized form follow the analyzer's named parameters.
///
/// # Example
///
/// ```
/// use jet_tag_training::TrainerConfig;
///
/// let config = TrainerConfig::from_json(r#"{
///     "jetTagComputer": "combinedSecondaryVertex",
///     "signalFlavours": [5, 7],
///     "tagInfos": { "tagInfo": "impactParameterTagInfos" }
/// }"#).unwrap();
///
/// assert_eq!(config.signal_flavours, vec![5, 7]);
/// assert_eq!(config.min_pt, 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Event tag of the jet flavour matching collection.
    #[serde(rename = "jetFlavourMatching")]
    pub jet_flavour_matching: String,

    /// Minimum jet transverse momentum in GeV.
    #[serde(rename = "minimumTransverseMomentum")]
    pub min_pt: f64,

    /// Minimum absolute pseudorapidity.
    #[serde(rename = "minimumPseudoRapidity")]
    pub min_eta: f64,

    /// Maximum absolute pseudorapidity.
    #[serde(rename = "maximumPseudoRapidity")]
    pub max_eta: f64,

    /// Name of the jet-tag computer providing the tagging variables.
    #[serde(rename = "jetTagComputer")]
    pub jet_tag_computer: String,

    /// Flavours trained as signal.
    #[serde(rename = "signalFlavours")]
    pub signal_flavours: Vec<i32>,

    /// Flavours excluded from training.
    #[serde(rename = "ignoreFlavours")]
    pub ignore_flavours: Vec<i32>,

    /// Whether jets are split into categories, one calibration per category.
    #[serde(rename = "useCategories")]
    pub use_categories: bool,

    /// Calibration label used without categories.
    #[serde(rename = "calibrationRecord")]
    pub calibration_record: String,

    /// Calibration labels, one per category.
    #[serde(rename = "calibrationRecords")]
    pub calibration_records: Vec<String>,

    /// Tagging variable whose value selects the category.
    #[serde(rename = "categoryVariableName")]
    pub category_variable: String,

    /// Tag-info input tags keyed by the label the computer asks for.
    #[serde(rename = "tagInfos")]
    pub tag_infos: BTreeMap<String, String>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            jet_flavour_matching: "jetFlavour".to_string(),
            min_pt: 10.0,
            min_eta: 0.0,
            max_eta: 2.5,
            jet_tag_computer: String::new(),
            signal_flavours: vec![5, 7],
            ignore_flavours: vec![0],
            use_categories: false,
            calibration_record: String::new(),
            calibration_records: Vec::new(),
            category_variable: "vertexCategory".to_string(),
            tag_infos: BTreeMap::new(),
        }
    }
}

impl TrainerConfig {
    /// Parses a configuration from named parameters in JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::InvalidConfig`] if the JSON is malformed or
    /// the configuration fails [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the kinematic window.
    #[must_use]
    pub const fn with_kinematics(mut self, min_pt: f64, min_eta: f64, max_eta: f64) -> Self {
        self.min_pt = min_pt;
        self.min_eta = min_eta;
        self.max_eta = max_eta;
        self
    }

    /// Sets the signal flavours.
    #[must_use]
    pub fn with_signal_flavours(mut self, flavours: Vec<i32>) -> Self {
        self.signal_flavours = flavours;
        self
    }

    /// Sets the ignored flavours.
    #[must_use]
    pub fn with_ignore_flavours(mut self, flavours: Vec<i32>) -> Self {
        self.ignore_flavours = flavours;
        self
    }

    /// Uses a single calibration label, no categories.
    #[must_use]
    pub fn with_calibration_record(mut self, label: impl Into<String>) -> Self {
        self.use_categories = false;
        self.calibration_record = label.into();
        self
    }

    /// Uses one calibration label per category, selected by a tagging variable.
    #[must_use]
    pub fn with_categories(mut self, variable: impl Into<String>, labels: Vec<String>) -> Self {
        self.use_categories = true;
        self.category_variable = variable.into();
        self.calibration_records = labels;
        self
    }

    /// Maps a computer input label to an event tag.
    #[must_use]
    pub fn with_tag_info(mut self, label: impl Into<String>, tag: impl Into<String>) -> Self {
        self.tag_infos.insert(label.into(), tag.into());
        self
    }

    /// Calibration labels the trainer feeds.
    #[must_use]
    pub fn calibration_labels(&self) -> Vec<String> {
        if self.use_categories {
            self.calibration_records.clone()
        } else {
            vec![self.calibration_record.clone()]
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::InvalidConfig`] if the kinematic window is
    /// invalid or categories are enabled without any calibration labels.
    pub fn validate(&self) -> Result<()> {
        if self.min_pt.is_nan() || self.min_pt < 0.0 {
            return Err(TrainingError::invalid_config(
                "minimumTransverseMomentum must be non-negative",
            ));
        }
        let window_ok = self.min_eta >= 0.0 && self.min_eta <= self.max_eta;
        if !window_ok {
            return Err(TrainingError::invalid_config(format!(
                "pseudorapidity window [{}, {}] is invalid",
                self.min_eta, self.max_eta
            )));
        }
        if self.use_categories && self.calibration_records.is_empty() {
            return Err(TrainingError::invalid_config(
                "useCategories requires calibrationRecords",
            ));
        }
        Ok(())
    }
}

/// A sorted set of jet flavours.
///
/// # Example
///
/// ```
/// use jet_tag_training::FlavourSet;
///
/// let set = FlavourSet::new(vec![7, 5, 5]);
/// assert!(set.contains(5));
/// assert!(!set.contains(4));
/// assert_eq!(set.as_slice(), &[5, 7]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlavourSet {
    flavours: Vec<i32>,
}

impl FlavourSet {
    /// Creates a set, sorting and deduplicating the flavours.
    #[must_use]
    pub fn new(mut flavours: Vec<i32>) -> Self {
        flavours.sort_unstable();
        flavours.dedup();
        Self { flavours }
    }

    /// Checks membership.
    #[must_use]
    pub fn contains(&self, flavour: i32) -> bool {
        self.flavours.binary_search(&flavour).is_ok()
    }

    /// The flavours in ascending order.
    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.flavours
    }

    /// Checks if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flavours.is_empty()
    }
}
