// In-memory backend that records configuration instead of training.
//
// Used by the CLI to show what a model would look like, and by tests as the
// target model. It enforces the same rules the modeling library does:
// unique names per registry, known topic and class ids, and a dictionary
// bound before anything is attached.

use std::collections::HashSet;

use anyhow::{bail, Result};
use tracing::{debug, info};

use super::settings::{LibraryLogging, ModelSettings};
use super::specs::{RegularizerSpec, ScoreSpec};
use super::traits::{ModelBackend, TopicModel};
use crate::dictionary::Dictionary;

/// Lifecycle of a single model instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    /// Built from settings, no dictionary yet
    Constructed,
    /// Parameter matrices allocated against a dictionary
    Initialized,
    /// At least one score or regularizer attached
    Configured,
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    logging: Option<LibraryLogging>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// The library log settings applied so far, if any.
    pub fn logging(&self) -> Option<LibraryLogging> {
        self.logging
    }
}

impl ModelBackend for RecordingBackend {
    type Model = RecordingModel;

    fn configure_logging(&mut self, logging: LibraryLogging) -> Result<()> {
        debug!(min_log_level = logging.min_log_level, "Configured library logging");
        self.logging = Some(logging);
        Ok(())
    }

    fn create_model(&self, settings: &ModelSettings) -> Result<RecordingModel> {
        RecordingModel::new(settings.clone())
    }
}

#[derive(Debug, Clone)]
pub struct RecordingModel {
    pub settings: ModelSettings,
    state: ModelState,
    dictionary_name: Option<String>,
    /// (tokens in configured modalities, topics)
    phi_shape: Option<(usize, usize)>,
    scores: Vec<ScoreSpec>,
    regularizers: Vec<RegularizerSpec>,
}

impl RecordingModel {
    pub fn new(settings: ModelSettings) -> Result<Self> {
        if settings.topic_names.is_empty() {
            bail!("Model needs at least one topic");
        }
        let mut seen = HashSet::new();
        for name in &settings.topic_names {
            if !seen.insert(name) {
                bail!("Topic name '{name}' is used more than once");
            }
        }
        for (class_id, weight) in &settings.class_ids {
            if !weight.is_finite() || *weight < 0.0 {
                bail!("Invalid weight {weight} for class_id '{class_id}'");
            }
        }
        if settings.num_processors == 0 {
            bail!("num_processors must be positive");
        }

        Ok(Self {
            settings,
            state: ModelState::Constructed,
            dictionary_name: None,
            phi_shape: None,
            scores: Vec::new(),
            regularizers: Vec::new(),
        })
    }

    pub fn state(&self) -> ModelState {
        self.state
    }

    pub fn dictionary_name(&self) -> Option<&str> {
        self.dictionary_name.as_deref()
    }

    pub fn phi_shape(&self) -> Option<(usize, usize)> {
        self.phi_shape
    }

    pub fn scores(&self) -> &[ScoreSpec] {
        &self.scores
    }

    pub fn regularizers(&self) -> &[RegularizerSpec] {
        &self.regularizers
    }

    pub fn score(&self, name: &str) -> Option<&ScoreSpec> {
        self.scores.iter().find(|s| s.name == name)
    }

    pub fn regularizer(&self, name: &str) -> Option<&RegularizerSpec> {
        self.regularizers.iter().find(|r| r.name == name)
    }

    fn require_initialized(&self, what: &str) -> Result<()> {
        if self.state == ModelState::Constructed {
            bail!("Model must be initialized with a dictionary before adding {what}");
        }
        Ok(())
    }

    /// With no explicit class ids, every modality in the dictionary is used.
    fn check_class_ids(&self, class_ids: &[&str], owner: &str) -> Result<()> {
        if self.settings.class_ids.is_empty() {
            return Ok(());
        }
        for class_id in class_ids {
            if !self.settings.class_ids.contains_key(*class_id) {
                bail!("{owner} refers to unknown class_id '{class_id}'");
            }
        }
        Ok(())
    }
}

impl TopicModel for RecordingModel {
    fn initialize(&mut self, dictionary: &dyn Dictionary) -> Result<()> {
        let n_tokens = dictionary
            .entries()
            .iter()
            .filter(|e| {
                self.settings.class_ids.is_empty()
                    || self.settings.class_ids.contains_key(&e.class_id)
            })
            .count();
        if n_tokens == 0 {
            bail!(
                "Dictionary '{}' has no tokens for the model's class_ids",
                dictionary.name()
            );
        }

        let shape = (n_tokens, self.settings.topic_names.len());
        self.phi_shape = Some(shape);
        self.dictionary_name = Some(dictionary.name().to_string());
        if self.state == ModelState::Constructed {
            self.state = ModelState::Initialized;
        }

        info!(
            dictionary = dictionary.name(),
            tokens = shape.0,
            topics = shape.1,
            "Initialized model"
        );
        Ok(())
    }

    fn add_score(&mut self, score: ScoreSpec) -> Result<()> {
        self.require_initialized("scores")?;
        if self.score(&score.name).is_some() {
            bail!("Score with name '{}' already exists", score.name);
        }
        self.check_class_ids(&score.class_ids(), &format!("Score '{}'", score.name))?;

        debug!(name = %score.name, "Added score");
        self.scores.push(score);
        self.state = ModelState::Configured;
        Ok(())
    }

    fn add_regularizer(&mut self, regularizer: RegularizerSpec) -> Result<()> {
        self.require_initialized("regularizers")?;
        if self.regularizer(&regularizer.name).is_some() {
            bail!("Regularizer with name '{}' already exists", regularizer.name);
        }
        for topic in &regularizer.topic_names {
            if !self.settings.topic_names.contains(topic) {
                bail!(
                    "Regularizer '{}' refers to unknown topic '{topic}'",
                    regularizer.name
                );
            }
        }
        self.check_class_ids(
            &regularizer.class_ids(),
            &format!("Regularizer '{}'", regularizer.name),
        )?;

        debug!(name = %regularizer.name, tau = regularizer.tau, "Added regularizer");
        self.regularizers.push(regularizer);
        self.state = ModelState::Configured;
        Ok(())
    }

    fn score_names(&self) -> Vec<String> {
        self.scores.iter().map(|s| s.name.clone()).collect()
    }

    fn regularizer_names(&self) -> Vec<String> {
        self.regularizers.iter().map(|r| r.name.clone()).collect()
    }
}
