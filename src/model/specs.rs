// Score and regularizer descriptions.
//
// These are plain values: building them has no effect on any model.
// A backend turns each one into the library's concrete score/regularizer.

use serde::{Deserialize, Serialize};

/// A named evaluation metric to register on a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSpec {
    pub name: String,
    pub kind: ScoreKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScoreKind {
    Perplexity { class_ids: Vec<String> },
    SparsityTheta,
    SparsityPhi { class_id: String },
    TopicKernel {
        class_id: String,
        probability_mass_threshold: f64,
    },
}

impl ScoreSpec {
    pub fn perplexity(name: impl Into<String>, class_ids: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind: ScoreKind::Perplexity { class_ids },
        }
    }

    pub fn sparsity_theta(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ScoreKind::SparsityTheta,
        }
    }

    pub fn sparsity_phi(name: impl Into<String>, class_id: &str) -> Self {
        Self {
            name: name.into(),
            kind: ScoreKind::SparsityPhi {
                class_id: class_id.to_string(),
            },
        }
    }

    pub fn topic_kernel(name: impl Into<String>, class_id: &str, threshold: f64) -> Self {
        Self {
            name: name.into(),
            kind: ScoreKind::TopicKernel {
                class_id: class_id.to_string(),
                probability_mass_threshold: threshold,
            },
        }
    }

    /// Modalities this score reads. Empty means it isn't modality-scoped.
    pub fn class_ids(&self) -> Vec<&str> {
        match &self.kind {
            ScoreKind::Perplexity { class_ids } => class_ids.iter().map(String::as_str).collect(),
            ScoreKind::SparsityTheta => Vec::new(),
            ScoreKind::SparsityPhi { class_id } | ScoreKind::TopicKernel { class_id, .. } => {
                vec![class_id.as_str()]
            }
        }
    }
}

/// A named regularizer, scoped to a set of topics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularizerSpec {
    pub name: String,
    pub kind: RegularizerKind,
    pub topic_names: Vec<String>,
    /// Strength coefficient
    pub tau: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegularizerKind {
    /// Smooth/sparse the token-topic matrix for the given modalities
    SmoothSparsePhi { class_ids: Vec<String> },
    /// Smooth/sparse the document-topic matrix (all modalities)
    SmoothSparseTheta,
}

impl RegularizerSpec {
    pub fn class_ids(&self) -> Vec<&str> {
        match &self.kind {
            RegularizerKind::SmoothSparsePhi { class_ids } => {
                class_ids.iter().map(String::as_str).collect()
            }
            RegularizerKind::SmoothSparseTheta => Vec::new(),
        }
    }
}
