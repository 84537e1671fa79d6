// Model construction: from high-level intent to a configured model.
//
// The pipeline:
//   topic names + modality weights -> ModelPlan -> backend model
//   -> initialize(dictionary) -> regularizers -> scores
//
// A ModelPlan is the full description of what will be configured. All
// precondition checks happen while building it, so applying a plan only
// fails on errors raised by the model itself.

use std::collections::HashSet;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::dictionary::{Dataset, Dictionary};
use crate::error::require_main_modality;
use crate::model::{ModelBackend, ModelSettings, RegularizerSpec, ScoreSpec, TopicModel};
use crate::model_id;
use crate::regularizers::background_regularizers;
use crate::scores::standard_scores;
use crate::topics::{TopicGroups, TopicSpec};
use crate::vocab::{self, ModalityWeights};

/// Main modality used when none is given.
pub const DEFAULT_MAIN_MODALITY: &str = "@lemmatized";

/// Modalities used when none are given.
pub const DEFAULT_MODALITIES: [&str; 2] = ["@lemmatized", "@ngramms"];

/// Create a model with the standard construction settings.
pub fn init_model<B: ModelBackend>(
    backend: &B,
    topic_names: Vec<String>,
    seed: Option<u64>,
    class_ids: ModalityWeights,
) -> Result<B::Model> {
    let settings = ModelSettings::new(topic_names, class_ids, seed);
    backend.create_model(&settings)
}

/// Everything needed to build the default model for a dataset.
#[derive(Debug, Clone)]
pub struct DefaultModelRequest {
    pub modalities_to_use: Vec<String>,
    pub main_modality: String,
    pub specific_topics: TopicSpec,
    pub background_topics: TopicSpec,
    pub seed: Option<u64>,
    /// Padded to a fixed width; a timestamp id is used when absent
    pub model_id: Option<String>,
    /// Ids already taken (e.g. by other models of the experiment)
    pub existing_model_ids: HashSet<String>,
}

impl DefaultModelRequest {
    pub fn new(specific_topics: TopicSpec, background_topics: TopicSpec) -> Self {
        Self {
            modalities_to_use: DEFAULT_MODALITIES.iter().map(|m| m.to_string()).collect(),
            main_modality: DEFAULT_MAIN_MODALITY.to_string(),
            specific_topics,
            background_topics,
            seed: None,
            model_id: None,
            existing_model_ids: HashSet::new(),
        }
    }
}

/// A complete, inspectable description of a configured model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelPlan {
    pub model_id: String,
    pub main_modality: String,
    pub modalities: Vec<String>,
    pub topics: TopicGroups,
    /// Total token occurrences per modality the weights were derived from
    pub vocab_sizes: ModalityWeights,
    pub settings: ModelSettings,
    pub regularizers: Vec<RegularizerSpec>,
    pub scores: Vec<ScoreSpec>,
}

impl ModelPlan {
    /// Resolve topics, weigh modalities against the dictionary, and list the
    /// regularizers and scores to attach.
    pub fn build(request: &DefaultModelRequest, dictionary: &dyn Dictionary) -> Result<Self> {
        require_main_modality(&request.main_modality, &request.modalities_to_use)?;

        let topics = TopicGroups::resolve(&request.specific_topics, &request.background_topics)?;

        let relative = vocab::baseline_weights(&request.modalities_to_use);
        let vocab_sizes = vocab::count_vocab_size(dictionary, &request.modalities_to_use);
        let class_ids =
            vocab::modality_weight_rel2abs(&vocab_sizes, &relative, &request.main_modality)?;

        let settings = ModelSettings::new(topics.all_names(), class_ids, request.seed);
        let regularizers = background_regularizers(&topics.background, &request.main_modality);
        let scores = standard_scores(&request.main_modality, &request.modalities_to_use)?;

        let model_id =
            model_id::assign_model_id(request.model_id.as_deref(), &request.existing_model_ids);

        info!(
            model_id = %model_id,
            specific = topics.n_specific(),
            background = topics.n_background(),
            regularizers = regularizers.len(),
            scores = scores.len(),
            "Built model plan"
        );

        Ok(Self {
            model_id,
            main_modality: request.main_modality.clone(),
            modalities: request.modalities_to_use.clone(),
            topics,
            vocab_sizes,
            settings,
            regularizers,
            scores,
        })
    }

    /// Bind the model to the dictionary, then attach regularizers and scores
    /// in one pass.
    pub fn apply<M: TopicModel + ?Sized>(&self, model: &mut M, dictionary: &dyn Dictionary) -> Result<()> {
        model.initialize(dictionary)?;
        for regularizer in &self.regularizers {
            model.add_regularizer(regularizer.clone())?;
        }
        for score in &self.scores {
            model.add_score(score.clone())?;
        }
        Ok(())
    }

    /// Create the model on `backend` and apply this plan to it.
    pub fn instantiate<B: ModelBackend>(&self, backend: &B, dictionary: &dyn Dictionary) -> Result<B::Model> {
        let mut model = backend.create_model(&self.settings)?;
        self.apply(&mut model, dictionary)?;
        info!(model_id = %self.model_id, "Model configured");
        Ok(model)
    }
}

/// Build a model with background smoothing and the standard scores.
///
/// Returns the configured model together with the plan it was built from.
pub fn init_simple_default_model<B: ModelBackend>(
    backend: &B,
    dataset: &dyn Dataset,
    request: &DefaultModelRequest,
) -> Result<(B::Model, ModelPlan)> {
    let dictionary = dataset.get_dictionary()?;
    let plan = ModelPlan::build(request, dictionary.as_ref())?;
    let model = plan.instantiate(backend, dictionary.as_ref())?;
    Ok((model, plan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{DictionaryDataset, DictionaryEntry, TextDictionary};
    use crate::error::ConfigError;
    use crate::model::{ModelState, RecordingBackend};

    fn dataset() -> DictionaryDataset {
        let entry = |token: &str, class_id: &str, tf: f64| DictionaryEntry {
            token: token.to_string(),
            class_id: class_id.to_string(),
            token_value: 0.0,
            token_tf: tf,
            token_df: 1.0,
        };
        DictionaryDataset::new(TextDictionary::new(
            "news",
            vec![
                entry("market", "@lemmatized", 60.0),
                entry("rate", "@lemmatized", 40.0),
                entry("central_bank", "@ngramms", 25.0),
            ],
        ))
    }

    #[test]
    fn test_default_model_end_to_end() {
        let backend = RecordingBackend::new();
        let mut request = DefaultModelRequest::new(TopicSpec::Count(3), TopicSpec::Count(1));
        request.seed = Some(42);
        let (model, plan) = init_simple_default_model(&backend, &dataset(), &request).unwrap();

        assert_eq!(model.state(), ModelState::Configured);
        assert_eq!(
            model.settings.topic_names,
            vec!["topic_0", "topic_1", "topic_2", "background_3"]
        );
        assert_eq!(model.settings.seed, Some(42));
        assert!((model.settings.class_ids["@ngramms"] - 4.0).abs() < 1e-9);
        assert_eq!(model.regularizer_names(), vec!["smooth_phi_bcg", "smooth_theta_bcg"]);
        assert_eq!(model.score_names().len(), 8);
        assert_eq!(plan.model_id.len(), model_id::MODEL_NAME_LENGTH);
    }

    #[test]
    fn test_bad_main_modality_fails_before_model_exists() {
        let backend = RecordingBackend::new();
        let mut request = DefaultModelRequest::new(TopicSpec::Count(2), TopicSpec::Count(0));
        request.main_modality = "@text".to_string();
        let err = init_simple_default_model(&backend, &dataset(), &request).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::MainModalityNotInModalities { .. })
        ));
    }

    #[test]
    fn test_init_model_settings() {
        let backend = RecordingBackend::new();
        let model = init_model(
            &backend,
            vec!["topic_0".to_string()],
            None,
            ModalityWeights::new(),
        )
        .unwrap();
        assert_eq!(model.settings.num_processors, 3);
        assert_eq!(model.state(), ModelState::Constructed);
    }
}
