// Vocabulary weighting: per-modality absolute weights.
//
// Relative weights ("n-grams count half as much as words") become absolute
// class weights by rescaling each modality against the main one's token mass:
//
//   abs[m] = rel[m] * tokens[main] / tokens[m]
//
// so the main modality keeps its relative weight as-is.

use std::collections::BTreeMap;

use tracing::debug;

use crate::dictionary::Dictionary;
use crate::error::ConfigError;

/// Modality name -> value. Ordered so output is stable.
pub type ModalityWeights = BTreeMap<String, f64>;

/// Total token occurrences (`token_tf`) per modality in use.
///
/// Every requested modality appears in the result, with 0.0 if the
/// dictionary has no tokens for it. Modalities not requested are ignored.
pub fn count_vocab_size(dictionary: &dyn Dictionary, modalities: &[String]) -> ModalityWeights {
    let mut counts: ModalityWeights = modalities.iter().map(|m| (m.clone(), 0.0)).collect();
    for entry in dictionary.entries() {
        if let Some(count) = counts.get_mut(&entry.class_id) {
            *count += entry.token_tf;
        }
    }
    debug!(?counts, "Counted vocabulary per modality");
    counts
}

/// Relative weight 1.0 for every modality in use.
pub fn baseline_weights(modalities: &[String]) -> ModalityWeights {
    modalities.iter().map(|m| (m.clone(), 1.0)).collect()
}

/// Convert relative modality weights into absolute ones.
///
/// Pure: the same inputs always give the same map.
pub fn modality_weight_rel2abs(
    tokens_data: &ModalityWeights,
    relative: &ModalityWeights,
    main_modality: &str,
) -> Result<ModalityWeights, ConfigError> {
    let main_tokens = match tokens_data.get(main_modality) {
        Some(&count) if count > 0.0 => count,
        Some(_) => return Err(ConfigError::EmptyModality(main_modality.to_string())),
        None => {
            return Err(ConfigError::MainModalityMissingFromStatistics(
                main_modality.to_string(),
            ))
        }
    };

    let mut absolute = ModalityWeights::new();
    for (modality, &weight) in relative {
        let tokens = *tokens_data
            .get(modality)
            .ok_or_else(|| ConfigError::UnknownRelativeWeightModality(modality.clone()))?;
        if tokens <= 0.0 {
            return Err(ConfigError::EmptyModality(modality.clone()));
        }
        absolute.insert(modality.clone(), weight * main_tokens / tokens);
    }

    Ok(absolute)
}
