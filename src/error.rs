// Precondition errors for model configuration.
//
// These are raised before anything is mutated. Errors coming from the model
// backend itself (duplicate names, unknown class ids) are not translated into
// this type, they flow through `anyhow` untouched.

use thiserror::Error;

/// A configuration that can never produce a valid model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The main modality has to be one of the modalities in use.
    #[error("main_modality must be part of all_modalities: {main_modality:?} not in {all_modalities:?}")]
    MainModalityNotInModalities {
        main_modality: String,
        all_modalities: Vec<String>,
    },

    /// Vocabulary statistics carry no count for the main modality.
    #[error("no vocabulary statistics for main modality {0:?}")]
    MainModalityMissingFromStatistics(String),

    /// A weighted modality has no tokens, so its absolute weight is undefined.
    #[error("modality {0:?} has no tokens in the dictionary")]
    EmptyModality(String),

    /// A relative weight was given for a modality missing from the statistics.
    #[error("relative weight given for modality {0:?} with no vocabulary statistics")]
    UnknownRelativeWeightModality(String),

    /// Topic names share one flat identifier space across both groups.
    #[error("duplicate topic name {0:?}")]
    DuplicateTopicName(String),

    #[error("invalid topic specification: {0}")]
    InvalidTopicSpec(String),

    /// A dictionary dump line that can't be parsed.
    #[error("malformed dictionary at line {line}: {reason}")]
    MalformedDictionary { line: usize, reason: String },
}

impl ConfigError {
    pub fn main_not_in_modalities(main_modality: &str, all_modalities: &[String]) -> Self {
        Self::MainModalityNotInModalities {
            main_modality: main_modality.to_string(),
            all_modalities: all_modalities.to_vec(),
        }
    }

    pub fn malformed_dictionary(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedDictionary {
            line,
            reason: reason.into(),
        }
    }
}

/// Fail unless `main_modality` is one of `all_modalities`.
pub fn require_main_modality(main_modality: &str, all_modalities: &[String]) -> Result<(), ConfigError> {
    if all_modalities.iter().any(|m| m == main_modality) {
        Ok(())
    } else {
        Err(ConfigError::main_not_in_modalities(main_modality, all_modalities))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_main_modality() {
        let mods = vec!["@lemmatized".to_string(), "@ngramms".to_string()];
        assert!(require_main_modality("@ngramms", &mods).is_ok());

        let err = require_main_modality("@text", &mods).unwrap_err();
        assert!(err.to_string().contains("main_modality must be part of all_modalities"));
    }
}
