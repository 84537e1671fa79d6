// Composition tests: the full construction pipeline on the recording backend.
//
//   dictionary -> weights + topic names -> plan -> model (regularizers, scores)
//
// No modeling library is involved; the recording model enforces the same
// naming and scoping rules and lets us inspect what was attached.

use std::sync::Arc;

use artm_constructor::constructor::{
    init_model, init_simple_default_model, DefaultModelRequest, ModelPlan,
};
use artm_constructor::dictionary::{
    Dataset, Dictionary, DictionaryDataset, DictionaryEntry, TextDictionary,
};
use artm_constructor::model::{
    ModelBackend, ModelState, RecordingBackend, RecordingModel, RegularizerKind, ScoreKind,
    TopicModel,
};
use artm_constructor::model_id::{pad_model_name, MODEL_NAME_LENGTH};
use artm_constructor::regularizers::add_background_regularizers;
use artm_constructor::scores::add_standard_scores;
use artm_constructor::topics::TopicSpec;
use artm_constructor::vocab::ModalityWeights;
use artm_constructor::ConfigError;

const DICTIONARY_TEXT: &str = "name: news num_items: 5\n\
    token, class_id, token_value, token_tf, token_df\n\
    market, @lemmatized, 0.3, 300, 120\n\
    rate, @lemmatized, 0.2, 200, 90\n\
    inflation, @lemmatized, 0.1, 100, 50\n\
    central_bank, @ngramms, 0.05, 90, 40\n\
    interest_rate, @ngramms, 0.03, 60, 30\n";

fn dataset() -> DictionaryDataset {
    DictionaryDataset::new(TextDictionary::parse(DICTIONARY_TEXT).unwrap())
}

fn modalities() -> Vec<String> {
    vec!["@lemmatized".to_string(), "@ngramms".to_string()]
}

fn request(specific: usize, background: usize) -> DefaultModelRequest {
    DefaultModelRequest::new(TopicSpec::Count(specific), TopicSpec::Count(background))
}

fn initialized_model() -> RecordingModel {
    let backend = RecordingBackend::new();
    let weights: ModalityWeights = modalities().into_iter().map(|m| (m, 1.0)).collect();
    let mut model = init_model(
        &backend,
        vec!["topic_0".to_string(), "background_1".to_string()],
        Some(7),
        weights,
    )
    .unwrap();
    let dictionary = dataset().get_dictionary().unwrap();
    model.initialize(dictionary.as_ref()).unwrap();
    model
}

// ============================================================
// Scores
// ============================================================

#[test]
fn two_modalities_yield_eight_scores() {
    let mut model = initialized_model();
    add_standard_scores(&mut model, "@lemmatized", &modalities()).unwrap();
    assert_eq!(model.scores().len(), 8);
    assert!(model.score("PerplexityScore@all").is_some());
    assert!(model.score("SparsityThetaScore").is_some());
    for modality in modalities() {
        assert!(model.score(&format!("SparsityPhiScore{modality}")).is_some());
        assert!(model.score(&format!("PerplexityScore{modality}")).is_some());
        assert!(model.score(&format!("TopicKernel{modality}")).is_some());
    }
}

#[test]
fn single_modality_yields_five_scores() {
    let mut model = initialized_model();
    add_standard_scores(&mut model, "@ngramms", &["@ngramms".to_string()]).unwrap();
    assert_eq!(model.scores().len(), 5);
}

#[test]
fn main_modality_outside_list_leaves_model_untouched() {
    let mut model = initialized_model();
    let err = add_standard_scores(&mut model, "@text", &modalities()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::MainModalityNotInModalities { .. })
    ));
    assert!(model.scores().is_empty());
    assert_eq!(model.state(), ModelState::Initialized);
}

#[test]
fn attaching_scores_twice_is_a_model_error() {
    let mut model = initialized_model();
    add_standard_scores(&mut model, "@lemmatized", &modalities()).unwrap();
    let err = add_standard_scores(&mut model, "@lemmatized", &modalities()).unwrap_err();
    assert!(err.downcast_ref::<ConfigError>().is_none());
    assert!(err.to_string().contains("already exists"));
    assert_eq!(model.scores().len(), 8);
}

// ============================================================
// Regularizers
// ============================================================

#[test]
fn no_background_means_no_regularizers() {
    let backend = RecordingBackend::new();
    let mut req = request(0, 0);
    req.specific_topics = TopicSpec::Names(vec!["only".to_string()]);
    let (model, plan) = init_simple_default_model(&backend, &dataset(), &req).unwrap();
    assert!(model.regularizers().is_empty());
    assert!(plan.regularizers.is_empty());
}

#[test]
fn zero_specific_zero_background_has_no_regularizers() {
    let dictionary = TextDictionary::parse(DICTIONARY_TEXT).unwrap();
    let plan = ModelPlan::build(&request(0, 0), &dictionary).unwrap();
    assert!(plan.regularizers.is_empty());
    assert!(plan.topics.all_names().is_empty());
}

#[test]
fn zero_topics_rejected_by_model_without_registering_anything() {
    let backend = RecordingBackend::new();
    let err = init_simple_default_model(&backend, &dataset(), &request(0, 0)).unwrap_err();
    // the plan is valid; the model itself refuses an empty topic list
    assert!(err.downcast_ref::<ConfigError>().is_none());
    assert!(err.to_string().contains("at least one topic"));

    // nothing can be attached to a model that was never created
    let dictionary = TextDictionary::parse(DICTIONARY_TEXT).unwrap();
    let plan = ModelPlan::build(&request(0, 0), &dictionary).unwrap();
    assert!(backend.create_model(&plan.settings).is_err());
}

#[test]
fn three_background_topics_get_two_inert_regularizers() {
    let backend = RecordingBackend::new();
    let (model, _plan) = init_simple_default_model(&backend, &dataset(), &request(4, 3)).unwrap();

    assert_eq!(
        model.regularizer_names(),
        vec!["smooth_phi_bcg", "smooth_theta_bcg"]
    );
    let background = vec![
        "background_4".to_string(),
        "background_5".to_string(),
        "background_6".to_string(),
    ];
    for reg in model.regularizers() {
        assert_eq!(reg.tau, 0.0);
        assert_eq!(reg.topic_names, background);
    }

    let phi = model.regularizer("smooth_phi_bcg").unwrap();
    assert_eq!(
        phi.kind,
        RegularizerKind::SmoothSparsePhi {
            class_ids: vec!["@lemmatized".to_string()]
        }
    );
    let theta = model.regularizer("smooth_theta_bcg").unwrap();
    assert_eq!(theta.kind, RegularizerKind::SmoothSparseTheta);
}

#[test]
fn regularizers_on_unknown_topics_rejected_by_model() {
    let mut model = initialized_model();
    let err =
        add_background_regularizers(&mut model, &["background_9".to_string()], "@lemmatized")
            .unwrap_err();
    assert!(err.to_string().contains("unknown topic"));
    assert!(model.regularizers().is_empty());
}

// ============================================================
// Full pipeline
// ============================================================

#[test]
fn default_model_is_fully_configured() {
    let backend = RecordingBackend::new();
    let mut req = request(5, 2);
    req.seed = Some(2026);
    req.model_id = Some("baseline".to_string());

    let (model, plan) = init_simple_default_model(&backend, &dataset(), &req).unwrap();

    assert_eq!(model.state(), ModelState::Configured);
    assert_eq!(model.dictionary_name(), Some("news"));
    assert_eq!(model.phi_shape(), Some((5, 7)));
    assert_eq!(model.settings.seed, Some(2026));
    assert_eq!(model.settings.num_processors, 3);
    assert!(!model.settings.show_progress_bars);
    assert_eq!(model.settings.topic_names.last().unwrap(), "background_6");

    // @lemmatized 600 tokens vs @ngramms 150
    assert!((model.settings.class_ids["@lemmatized"] - 1.0).abs() < 1e-9);
    assert!((model.settings.class_ids["@ngramms"] - 4.0).abs() < 1e-9);

    assert_eq!(model.scores().len(), 8);
    assert_eq!(model.regularizers().len(), 2);
    assert_eq!(plan.model_id.trim_matches('#'), "baseline");
}

#[test]
fn taken_model_id_gets_next_version() {
    let backend = RecordingBackend::new();
    let mut req = request(2, 1);
    req.model_id = Some("lenta_news_baseline_seed_2026".to_string());
    req.existing_model_ids = [pad_model_name("lenta_news_baseline_seed_2026")].into();

    let (_model, plan) = init_simple_default_model(&backend, &dataset(), &req).unwrap();
    assert_eq!(plan.model_id, "lenta_news_baseline_see__1");
    assert_eq!(plan.model_id.len(), MODEL_NAME_LENGTH);
}

#[test]
fn plan_and_model_agree() {
    let backend = RecordingBackend::new();
    let (model, plan) = init_simple_default_model(&backend, &dataset(), &request(3, 1)).unwrap();
    assert_eq!(model.settings, plan.settings);
    assert_eq!(model.scores(), plan.scores.as_slice());
    assert_eq!(model.regularizers(), plan.regularizers.as_slice());
}

#[test]
fn plan_serializes_to_json() {
    let dictionary = TextDictionary::parse(DICTIONARY_TEXT).unwrap();
    let plan = ModelPlan::build(&request(2, 1), &dictionary).unwrap();
    let json = serde_json::to_value(&plan).unwrap();

    assert_eq!(json["settings"]["theta_columns_naming"], "title");
    assert_eq!(json["settings"]["num_processors"], 3);
    assert_eq!(json["scores"].as_array().unwrap().len(), 8);
    assert_eq!(json["regularizers"][0]["kind"]["type"], "smooth_sparse_phi");
    assert_eq!(json["topics"]["background"][0], "background_2");
}

#[test]
fn kernel_scores_use_fixed_threshold() {
    let backend = RecordingBackend::new();
    let (model, _) = init_simple_default_model(&backend, &dataset(), &request(2, 0)).unwrap();
    let kernels: Vec<_> = model
        .scores()
        .iter()
        .filter_map(|s| match &s.kind {
            ScoreKind::TopicKernel {
                probability_mass_threshold,
                ..
            } => Some(*probability_mass_threshold),
            _ => None,
        })
        .collect();
    assert_eq!(kernels, vec![0.3, 0.3]);
}

#[test]
fn modality_missing_from_dictionary_fails_before_model_creation() {
    let backend = RecordingBackend::new();
    let mut req = request(2, 1);
    req.modalities_to_use = vec!["@lemmatized".to_string(), "@authors".to_string()];
    let err = init_simple_default_model(&backend, &dataset(), &req).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::EmptyModality("@authors".to_string()))
    );
}

struct FailingDataset;

impl Dataset for FailingDataset {
    fn get_dictionary(&self) -> anyhow::Result<Arc<dyn Dictionary>> {
        anyhow::bail!("dictionary not built yet")
    }
}

#[test]
fn dataset_errors_propagate() {
    let backend = RecordingBackend::new();
    let err = init_simple_default_model(&backend, &FailingDataset, &request(2, 1)).unwrap_err();
    assert!(err.to_string().contains("dictionary not built yet"));
}
