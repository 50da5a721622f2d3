//! Per-event inputs: jets, tag infos and flavour matches.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrainingError};

/// Identity of a jet within an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JetKey(pub u64);

/// Kinematics of a reconstructed jet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Jet {
    /// Identity of the jet.
    pub key: JetKey,
    /// Transverse momentum in GeV.
    pub pt: f64,
    /// Pseudorapidity.
    pub eta: f64,
}

impl Jet {
    /// Creates a jet.
    #[must_use]
    pub const fn new(key: u64, pt: f64, eta: f64) -> Self {
        Self {
            key: JetKey(key),
            pt,
            eta,
        }
    }
}

/// A named tagging variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name.
    pub name: String,
    /// Variable value.
    pub value: f64,
}

impl Variable {
    /// Creates a variable.
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Looks up the first variable with the given name.
#[must_use]
pub fn find_variable(variables: &[Variable], name: &str) -> Option<f64> {
    variables.iter().find(|v| v.name == name).map(|v| v.value)
}

/// Tagging information attached to one jet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagInfo {
    /// The jet this information belongs to.
    pub jet: Jet,
    /// Variables computed for the jet.
    pub variables: Vec<Variable>,
}

impl TagInfo {
    /// Creates a tag info.
    #[must_use]
    pub const fn new(jet: Jet, variables: Vec<Variable>) -> Self {
        Self { jet, variables }
    }
}

/// One tag-info collection of an event.
pub type TagInfoCollection = Vec<TagInfo>;

/// Truth flavour assigned to a jet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavourMatch {
    /// Matched jet.
    pub jet: JetKey,
    /// Flavour code.
    pub flavour: i32,
}

impl FlavourMatch {
    /// Creates a flavour match.
    #[must_use]
    pub const fn new(jet: u64, flavour: i32) -> Self {
        Self {
            jet: JetKey(jet),
            flavour,
        }
    }
}

/// Products of one event, addressed by event tag.
///
/// # Example
///
/// ```
/// use jet_tag_training::{FlavourMatch, Jet, JetEvent, TagInfo};
///
/// let event = JetEvent::new()
///     .with_tag_infos("ipTagInfos", vec![TagInfo::new(Jet::new(1, 30.0, 0.4), Vec::new())])
///     .with_flavours("jetFlavour", vec![FlavourMatch::new(1, 5)]);
///
/// assert_eq!(event.tag_infos("ipTagInfos").unwrap().len(), 1);
/// assert!(event.tag_infos("svTagInfos").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct JetEvent {
    tag_infos: HashMap<String, TagInfoCollection>,
    flavours: HashMap<String, Vec<FlavourMatch>>,
}

impl JetEvent {
    /// Creates an event with no products.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tag-info collection.
    #[must_use]
    pub fn with_tag_infos(mut self, tag: impl Into<String>, collection: TagInfoCollection) -> Self {
        self.tag_infos.insert(tag.into(), collection);
        self
    }

    /// Adds a flavour matching collection.
    #[must_use]
    pub fn with_flavours(mut self, tag: impl Into<String>, matches: Vec<FlavourMatch>) -> Self {
        self.flavours.insert(tag.into(), matches);
        self
    }

    /// Gets a tag-info collection.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::ProductNotFound`] if the tag is absent.
    pub fn tag_infos(&self, tag: &str) -> Result<&[TagInfo]> {
        self.tag_infos
            .get(tag)
            .map(Vec::as_slice)
            .ok_or_else(|| TrainingError::product_not_found(tag))
    }

    /// Gets a flavour matching collection.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::ProductNotFound`] if the tag is absent.
    pub fn flavours(&self, tag: &str) -> Result<&[FlavourMatch]> {
        self.flavours
            .get(tag)
            .map(Vec::as_slice)
            .ok_or_else(|| TrainingError::product_not_found(tag))
    }
}
