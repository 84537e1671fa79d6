use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::constructor::{DEFAULT_MAIN_MODALITY, DEFAULT_MODALITIES};
use crate::model::LibraryLogging;
use crate::topics::TopicSpec;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Command-line flags
/// override anything set here.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Text dump of the dictionary to build models against (ARTM_DICTIONARY_PATH)
    pub dictionary_path: Option<PathBuf>,
    pub main_modality: String,
    pub modalities: Vec<String>,
    pub specific_topics: TopicSpec,
    pub background_topics: TopicSpec,
    /// Fixed seed for reproducible initialization (ARTM_SEED)
    pub seed: Option<u64>,
    /// Verbosity passed to the modeling library (ARTM_LIBRARY_LOG_LEVEL)
    pub library_log_level: u8,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let modalities = match get("ARTM_MODALITIES") {
            Some(raw) => parse_list(&raw),
            None => DEFAULT_MODALITIES.iter().map(|m| m.to_string()).collect(),
        };

        let specific_topics = match get("ARTM_SPECIFIC_TOPICS") {
            Some(raw) => raw.parse::<TopicSpec>().context("Invalid ARTM_SPECIFIC_TOPICS")?,
            None => TopicSpec::Count(10),
        };
        let background_topics = match get("ARTM_BACKGROUND_TOPICS") {
            Some(raw) => raw.parse::<TopicSpec>().context("Invalid ARTM_BACKGROUND_TOPICS")?,
            None => TopicSpec::Count(1),
        };

        let seed = get("ARTM_SEED")
            .map(|raw| raw.trim().parse::<u64>())
            .transpose()
            .context("ARTM_SEED must be a non-negative integer")?;

        let library_log_level = match get("ARTM_LIBRARY_LOG_LEVEL") {
            Some(raw) => raw
                .trim()
                .parse::<u8>()
                .context("ARTM_LIBRARY_LOG_LEVEL must be an integer 0-3")?,
            None => LibraryLogging::default().min_log_level,
        };

        Ok(Self {
            dictionary_path: get("ARTM_DICTIONARY_PATH").map(PathBuf::from),
            main_modality: get("ARTM_MAIN_MODALITY")
                .unwrap_or_else(|| DEFAULT_MAIN_MODALITY.to_string()),
            modalities,
            specific_topics,
            background_topics,
            seed,
            library_log_level,
        })
    }

    /// Check that a dictionary path is configured.
    /// Call this before any operation that needs vocabulary statistics.
    pub fn require_dictionary(&self) -> Result<PathBuf> {
        match &self.dictionary_path {
            Some(path) => Ok(path.clone()),
            None => anyhow::bail!(
                "No dictionary given. Pass --dictionary or set ARTM_DICTIONARY_PATH in your .env file."
            ),
        }
    }
}

/// Split a comma-separated list, dropping blanks.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
