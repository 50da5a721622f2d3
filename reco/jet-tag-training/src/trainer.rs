//! Per-event jet selection feeding an MVA trainer.
//!
//! The tagging-variable computer and the training engine are external;
//! they are reached through [`TagComputer`] and [`MvaSink`].

use tracing::{debug, info};

use crate::association::associate;
use crate::config::{FlavourSet, TrainerConfig};
use crate::error::{Result, TrainingError};
use crate::event::{Jet, JetEvent, TagInfo, Variable, find_variable};

/// Name of the training target variable (1 for signal, 0 for background).
pub const TARGET_ID: &str = "__TARGET__";

/// Name of the jet transverse momentum variable.
pub const JET_PT: &str = "jetPt";

/// Name of the jet pseudorapidity variable.
pub const JET_ETA: &str = "jetEta";

/// Input label used when a computer declares none.
pub const DEFAULT_INPUT_LABEL: &str = "tagInfo";

/// The tag infos of one jet, one slot per computer input.
#[derive(Debug, Clone, Default)]
pub struct TagInfoHelper<'a> {
    tag_infos: Vec<Option<&'a TagInfo>>,
}

impl<'a> TagInfoHelper<'a> {
    /// Creates a helper from per-input slots.
    #[must_use]
    pub const fn new(tag_infos: Vec<Option<&'a TagInfo>>) -> Self {
        Self { tag_infos }
    }

    /// Tag info for input `index`, if the jet has one.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'a TagInfo> {
        self.tag_infos.get(index).copied().flatten()
    }

    /// Number of input slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tag_infos.len()
    }

    /// Checks if there are no input slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tag_infos.is_empty()
    }
}

/// Computes tagging variables from a jet's tag infos.
pub trait TagComputer {
    /// Labels of the tag-info inputs, in slot order.
    ///
    /// An empty list means a single input labelled [`DEFAULT_INPUT_LABEL`].
    fn input_labels(&self) -> Vec<String>;

    /// Computes the tagging variables of one jet.
    fn tagging_variables(&self, tag_infos: &TagInfoHelper<'_>) -> Vec<Variable>;
}

/// Receives training samples, one MVA computer per calibration label.
pub trait MvaSink {
    /// Whether calibrations are loaded at all. Events are skipped otherwise.
    fn is_ready(&self) -> bool {
        true
    }

    /// Whether a trainable computer exists for the calibration label.
    fn has_computer(&self, label: &str) -> bool;

    /// Feeds one sample: target, jet pt, jet eta, then the tagging variables.
    fn eval(&mut self, label: &str, values: &[Variable]);
}

/// Picks a category from the value of one tagging variable.
///
/// The value must be a non-negative integer smaller than the number of
/// categories.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySelector {
    variable: String,
    labels: Vec<String>,
}

impl CategorySelector {
    /// Creates a selector.
    #[must_use]
    pub fn new(variable: impl Into<String>, labels: Vec<String>) -> Self {
        Self {
            variable: variable.into(),
            labels,
        }
    }

    /// Calibration labels, one per category.
    #[must_use]
    pub fn category_labels(&self) -> &[String] {
        &self.labels
    }

    /// Finds the category of a jet, or `None` if it has none.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn find_category(&self, variables: &[Variable]) -> Option<usize> {
        let value = find_variable(variables, &self.variable)?;
        if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
            return None;
        }
        let index = value as usize;
        (index < self.labels.len()).then_some(index)
    }
}

/// Counts of what happened to the jets of one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventSummary {
    /// Jets with at least one tag info.
    pub jets: usize,
    /// Jets outside the kinematic window.
    pub kinematic_rejected: usize,
    /// Jets with an ignored flavour.
    pub ignored: usize,
    /// Jets without a category.
    pub uncategorised: usize,
    /// Jets whose calibration has no trainable computer.
    pub no_computer: usize,
    /// Jets fed to the trainer.
    pub trained: usize,
    /// Trained jets with a signal flavour.
    pub signal: usize,
}

/// Selects jets and feeds their tagging variables to an MVA trainer.
///
/// # Example
///
/// ```
/// use jet_tag_training::{
///     FlavourMatch, Jet, JetEvent, JetTagTrainer, MvaSink, TagComputer, TagInfo,
///     TagInfoHelper, TrainerConfig, Variable,
/// };
///
/// struct Ip;
/// impl TagComputer for Ip {
///     fn input_labels(&self) -> Vec<String> { Vec::new() }
///     fn tagging_variables(&self, h: &TagInfoHelper<'_>) -> Vec<Variable> {
///         h.get(0).map(|t| t.variables.clone()).unwrap_or_default()
///     }
/// }
///
/// #[derive(Default)]
/// struct Samples(Vec<Vec<Variable>>);
/// impl MvaSink for Samples {
///     fn has_computer(&self, _: &str) -> bool { true }
///     fn eval(&mut self, _: &str, values: &[Variable]) { self.0.push(values.to_vec()); }
/// }
///
/// let config = TrainerConfig::default()
///     .with_calibration_record("ImpactParameter")
///     .with_tag_info("tagInfo", "ipTagInfos");
/// let mut trainer = JetTagTrainer::new(config)?;
///
/// let event = JetEvent::new()
///     .with_tag_infos("ipTagInfos", vec![
///         TagInfo::new(Jet::new(1, 50.0, 0.3), vec![Variable::new("ip3d", 4.2)]),
///     ])
///     .with_flavours("jetFlavour", vec![FlavourMatch::new(1, 5)]);
///
/// let mut sink = Samples::default();
/// let summary = trainer.analyze(&event, &Ip, &mut sink)?;
/// assert_eq!(summary.trained, 1);
/// assert_eq!(sink.0[0][0].value, 1.0);
/// # Ok::<(), jet_tag_training::TrainingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct JetTagTrainer {
    config: TrainerConfig,
    signal: FlavourSet,
    ignore: FlavourSet,
    calibration_labels: Vec<String>,
    categories: Option<CategorySelector>,
    inputs: Option<Vec<String>>,
}

impl JetTagTrainer {
    /// Creates a trainer.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: TrainerConfig) -> Result<Self> {
        config.validate()?;

        let categories = config.use_categories.then(|| {
            CategorySelector::new(
                config.category_variable.clone(),
                config.calibration_records.clone(),
            )
        });

        Ok(Self {
            signal: FlavourSet::new(config.signal_flavours.clone()),
            ignore: FlavourSet::new(config.ignore_flavours.clone()),
            calibration_labels: config.calibration_labels(),
            categories,
            inputs: None,
            config,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Calibration labels fed by this trainer.
    #[must_use]
    pub fn calibration_labels(&self) -> &[String] {
        &self.calibration_labels
    }

    /// Resolves the computer's input labels to event tags.
    ///
    /// Runs once; later calls are no-ops.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::InputTagMissing`] for a label without a
    /// configured tag.
    pub fn setup(&mut self, input_labels: &[String]) -> Result<()> {
        if self.inputs.is_some() {
            return Ok(());
        }

        let default_label = [DEFAULT_INPUT_LABEL.to_string()];
        let labels = if input_labels.is_empty() {
            &default_label[..]
        } else {
            input_labels
        };

        let tags = labels
            .iter()
            .map(|label| {
                self.config
                    .tag_infos
                    .get(label)
                    .cloned()
                    .ok_or_else(|| TrainingError::input_tag_missing(label.as_str()))
            })
            .collect::<Result<Vec<_>>>()?;

        info!("Jet-tag trainer inputs resolved: {tags:?}");
        self.inputs = Some(tags);
        Ok(())
    }

    /// Whether [`setup`](Self::setup) has completed.
    #[must_use]
    pub const fn is_setup_done(&self) -> bool {
        self.inputs.is_some()
    }

    /// Event tags of the tag-info inputs, once set up.
    #[must_use]
    pub fn input_tags(&self) -> Option<&[String]> {
        self.inputs.as_deref()
    }

    /// Whether a flavour is trained as signal.
    #[must_use]
    pub fn is_signal_flavour(&self, flavour: i32) -> bool {
        self.signal.contains(flavour)
    }

    /// Whether a flavour is excluded from training.
    #[must_use]
    pub fn is_ignore_flavour(&self, flavour: i32) -> bool {
        self.ignore.contains(flavour)
    }

    /// Whether a jet lies inside the kinematic window.
    #[must_use]
    pub fn passes_kinematics(&self, jet: &Jet) -> bool {
        let abs_eta = jet.eta.abs();
        !(jet.pt < self.config.min_pt
            || abs_eta < self.config.min_eta
            || abs_eta > self.config.max_eta)
    }

    /// Processes one event.
    ///
    /// Sets the trainer up from the computer's input labels on first use,
    /// then feeds every selected jet to the sink.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::InputTagMissing`] if setup fails, or
    /// [`TrainingError::ProductNotFound`] if an input collection or the
    /// flavour matching is missing from the event.
    pub fn analyze(
        &mut self,
        event: &JetEvent,
        computer: &dyn TagComputer,
        sink: &mut dyn MvaSink,
    ) -> Result<EventSummary> {
        let mut summary = EventSummary::default();
        if !sink.is_ready() {
            debug!("No calibrations loaded, skipping event");
            return Ok(summary);
        }

        if self.inputs.is_none() {
            self.setup(&computer.input_labels())?;
        }
        let inputs = self.inputs.as_deref().unwrap_or(&[]);

        let collections = inputs
            .iter()
            .map(|tag| event.tag_infos(tag))
            .collect::<Result<Vec<_>>>()?;
        let matches = event.flavours(&self.config.jet_flavour_matching)?;

        let jet_infos = associate(&collections, matches);

        for info in jet_infos.values() {
            summary.jets += 1;

            if !self.passes_kinematics(&info.jet) {
                summary.kinematic_rejected += 1;
                continue;
            }
            // Unknown flavours are never trained.
            if self.is_ignore_flavour(info.flavour) {
                summary.ignored += 1;
                continue;
            }
            let target = self.is_signal_flavour(info.flavour);

            let helper = TagInfoHelper::new(
                info.tag_infos
                    .iter()
                    .zip(&collections)
                    .map(|(slot, collection)| slot.and_then(|j| collection.get(j)))
                    .collect(),
            );
            let variables = computer.tagging_variables(&helper);

            let index = match &self.categories {
                Some(selector) => {
                    let Some(index) = selector.find_category(&variables) else {
                        summary.uncategorised += 1;
                        continue;
                    };
                    index
                }
                None => 0,
            };

            let Some(label) = self.calibration_labels.get(index) else {
                summary.no_computer += 1;
                continue;
            };
            if !sink.has_computer(label) {
                summary.no_computer += 1;
                continue;
            }

            let mut values = Vec::with_capacity(3 + variables.len());
            values.push(Variable::new(TARGET_ID, f64::from(u8::from(target))));
            values.push(Variable::new(JET_PT, info.jet.pt));
            values.push(Variable::new(JET_ETA, info.jet.eta));
            values.extend(variables);

            sink.eval(label, &values);
            summary.trained += 1;
            if target {
                summary.signal += 1;
            }
        }

        debug!(
            "Event processed: {} jets, {} trained ({} signal)",
            summary.jets, summary.trained, summary.signal
        );
        Ok(summary)
    }
}
