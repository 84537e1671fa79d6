// Model traits: the swap-ready seam to the modeling library.
//
// A backend builds models from `ModelSettings`; a model accepts a dictionary
// and then score/regularizer specs one at a time. Errors from these calls
// belong to the library (name collisions, unknown class ids, shape
// mismatches) and are passed through as they are.

use anyhow::Result;

use super::settings::{LibraryLogging, ModelSettings};
use super::specs::{RegularizerSpec, ScoreSpec};
use crate::dictionary::Dictionary;

/// A configurable topic model instance.
///
/// Not safe for concurrent configuration; callers serialize access.
pub trait TopicModel {
    /// Bind the model to a dictionary, allocating its parameter matrices.
    fn initialize(&mut self, dictionary: &dyn Dictionary) -> Result<()>;

    fn add_score(&mut self, score: ScoreSpec) -> Result<()>;

    fn add_regularizer(&mut self, regularizer: RegularizerSpec) -> Result<()>;

    /// Names of registered scores, in registration order.
    fn score_names(&self) -> Vec<String>;

    /// Names of registered regularizers, in registration order.
    fn regularizer_names(&self) -> Vec<String>;
}

/// Factory for models plus process-wide library settings.
pub trait ModelBackend {
    type Model: TopicModel;

    /// Set the library's own log verbosity. Affects the whole process.
    fn configure_logging(&mut self, logging: LibraryLogging) -> Result<()>;

    fn create_model(&self, settings: &ModelSettings) -> Result<Self::Model>;
}
