// Dictionary and dataset traits.
//
// Dataset construction and dictionary building live outside this crate.
// Model setup only needs a dataset that can hand over its dictionary, and
// a dictionary that can enumerate its tokens with their modality and counts.

use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One token of the vocabulary, with its collection statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub token: String,
    /// Modality the token belongs to (e.g. "@lemmatized")
    pub class_id: String,
    pub token_value: f64,
    /// Total number of occurrences across the collection
    pub token_tf: f64,
    /// Number of documents containing the token
    pub token_df: f64,
}

/// A vocabulary index.
pub trait Dictionary: Send + Sync {
    /// Dictionary name as known to the modeling library.
    fn name(&self) -> &str;

    fn entries(&self) -> &[DictionaryEntry];

    /// Number of tokens across all modalities.
    fn len(&self) -> usize {
        self.entries().len()
    }

    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Anything that can provide the dictionary a model is built on.
pub trait Dataset {
    fn get_dictionary(&self) -> Result<Arc<dyn Dictionary>>;
}
