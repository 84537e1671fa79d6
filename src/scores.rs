// Standard scores: the fixed battery of evaluation metrics every model gets.
//
// One perplexity over all modalities, one theta sparsity, then per modality:
// phi sparsity, single-modality perplexity, and a topic kernel.

use anyhow::Result;
use tracing::info;

use crate::error::require_main_modality;
use crate::model::{ScoreSpec, TopicModel};

/// Probability mass a token needs in a topic to count as part of its kernel.
pub const KERNEL_PROBABILITY_MASS_THRESHOLD: f64 = 0.3;

pub const PERPLEXITY_ALL: &str = "PerplexityScore@all";
pub const SPARSITY_THETA: &str = "SparsityThetaScore";

/// Build the standard score list.
///
/// Fails if `main_modality` is not among `all_modalities`.
pub fn standard_scores(main_modality: &str, all_modalities: &[String]) -> Result<Vec<ScoreSpec>> {
    require_main_modality(main_modality, all_modalities)?;

    let mut scores = Vec::with_capacity(2 + 3 * all_modalities.len());
    scores.push(ScoreSpec::perplexity(PERPLEXITY_ALL, all_modalities.to_vec()));
    scores.push(ScoreSpec::sparsity_theta(SPARSITY_THETA));

    for modality in all_modalities {
        scores.push(ScoreSpec::sparsity_phi(
            format!("SparsityPhiScore{modality}"),
            modality,
        ));
        scores.push(ScoreSpec::perplexity(
            format!("PerplexityScore{modality}"),
            vec![modality.clone()],
        ));
        scores.push(ScoreSpec::topic_kernel(
            format!("TopicKernel{modality}"),
            modality,
            KERNEL_PROBABILITY_MASS_THRESHOLD,
        ));
    }

    Ok(scores)
}

/// Register the standard scores on a model.
///
/// The modality check runs before the first score is added, so a bad
/// configuration leaves the model untouched.
pub fn add_standard_scores<M: TopicModel + ?Sized>(
    model: &mut M,
    main_modality: &str,
    all_modalities: &[String],
) -> Result<()> {
    let scores = standard_scores(main_modality, all_modalities)?;
    let count = scores.len();
    for score in scores {
        model.add_score(score)?;
    }
    info!(scores = count, modalities = all_modalities.len(), "Attached standard scores");
    Ok(())
}
