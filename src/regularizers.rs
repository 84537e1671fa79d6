// Background regularizers.
//
// Background topics soak up generic tokens, so they get smoothing rather than
// sparsing. Both regularizers start inert (tau = 0.0) and are meant to be
// tuned during training.

use anyhow::Result;
use tracing::info;

use crate::model::{RegularizerKind, RegularizerSpec, TopicModel};

pub const SMOOTH_PHI_BACKGROUND: &str = "smooth_phi_bcg";
pub const SMOOTH_THETA_BACKGROUND: &str = "smooth_theta_bcg";

/// Initial strength of the background smoothing regularizers.
pub const BACKGROUND_TAU: f64 = 0.0;

/// Smoothing regularizers for the background group.
///
/// Returns nothing when there are no background topics.
pub fn background_regularizers(background_topics: &[String], main_modality: &str) -> Vec<RegularizerSpec> {
    if background_topics.is_empty() {
        return Vec::new();
    }

    vec![
        RegularizerSpec {
            name: SMOOTH_PHI_BACKGROUND.to_string(),
            kind: RegularizerKind::SmoothSparsePhi {
                class_ids: vec![main_modality.to_string()],
            },
            topic_names: background_topics.to_vec(),
            tau: BACKGROUND_TAU,
        },
        RegularizerSpec {
            name: SMOOTH_THETA_BACKGROUND.to_string(),
            kind: RegularizerKind::SmoothSparseTheta,
            topic_names: background_topics.to_vec(),
            tau: BACKGROUND_TAU,
        },
    ]
}

/// Attach the background regularizers to a model, if there are background topics.
///
/// Name collisions are left to the model.
pub fn add_background_regularizers<M: TopicModel + ?Sized>(
    model: &mut M,
    background_topics: &[String],
    main_modality: &str,
) -> Result<()> {
    let regularizers = background_regularizers(background_topics, main_modality);
    if regularizers.is_empty() {
        return Ok(());
    }
    for regularizer in regularizers {
        model.add_regularizer(regularizer)?;
    }
    info!(background_topics = background_topics.len(), "Attached background regularizers");
    Ok(())
}
