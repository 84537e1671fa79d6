// Construction-time model settings. Written once, then handed to a backend.

use serde::{Deserialize, Serialize};

use crate::vocab::ModalityWeights;

/// Processor threads the library trains with.
pub const NUM_PROCESSORS: usize = 3;

/// How theta columns (documents) are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThetaColumnsNaming {
    Id,
    Title,
}

/// Everything a model is constructed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Specific topic names followed by background topic names
    pub topic_names: Vec<String>,
    /// Absolute weight per modality
    pub class_ids: ModalityWeights,
    pub num_processors: usize,
    pub theta_columns_naming: ThetaColumnsNaming,
    pub show_progress_bars: bool,
    /// None means non-deterministic initialization
    pub seed: Option<u64>,
}

impl ModelSettings {
    pub fn new(topic_names: Vec<String>, class_ids: ModalityWeights, seed: Option<u64>) -> Self {
        Self {
            topic_names,
            class_ids,
            num_processors: NUM_PROCESSORS,
            theta_columns_naming: ThetaColumnsNaming::Title,
            show_progress_bars: false,
            seed,
        }
    }
}

/// Verbosity of the modeling library's own log output.
///
/// Applied once per process through `ModelBackend::configure_logging`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryLogging {
    /// 0 = info, 1 = warning, 2 = error, 3 = fatal only
    pub min_log_level: u8,
}

impl Default for LibraryLogging {
    fn default() -> Self {
        Self { min_log_level: 3 }
    }
}
