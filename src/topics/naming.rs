// Topic naming: turn "5 topics" or an explicit list into concrete names.
//
// Specific topics are named topic_0..topic_{k-1}. Background topics continue
// the same counter: background_k..background_{k+b-1}, where k is the number
// of specific topics (whether they were counted or listed). The combined
// list is one flat identifier space in the model, so names must be unique
// across both groups.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// How a topic group is specified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopicSpec {
    /// Generate this many synthetic names
    Count(usize),
    /// Use these names verbatim, in this order
    Names(Vec<String>),
}

impl From<usize> for TopicSpec {
    fn from(count: usize) -> Self {
        Self::Count(count)
    }
}

impl From<Vec<String>> for TopicSpec {
    fn from(names: Vec<String>) -> Self {
        Self::Names(names)
    }
}

impl FromStr for TopicSpec {
    type Err = ConfigError;

    /// A bare integer is a count; anything else is a comma-separated name list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(count) = s.parse::<usize>() {
            return Ok(Self::Count(count));
        }
        if s.starts_with('-') && s[1..].parse::<u64>().is_ok() {
            return Err(ConfigError::InvalidTopicSpec(format!(
                "topic count must not be negative: {s}"
            )));
        }
        let names: Vec<String> = s
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from)
            .collect();
        if names.is_empty() {
            return Err(ConfigError::InvalidTopicSpec(format!(
                "expected a count or comma-separated names, got {s:?}"
            )));
        }
        Ok(Self::Names(names))
    }
}

impl fmt::Display for TopicSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Names(names) => write!(f, "{}", names.join(",")),
        }
    }
}

/// Resolved specific and background topic names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicGroups {
    pub specific: Vec<String>,
    pub background: Vec<String>,
}

impl TopicGroups {
    pub fn resolve(specific: &TopicSpec, background: &TopicSpec) -> Result<Self, ConfigError> {
        let specific = match specific {
            TopicSpec::Names(names) => names.clone(),
            TopicSpec::Count(n) => (0..*n).map(|i| format!("topic_{i}")).collect(),
        };

        let offset = specific.len();
        let background = match background {
            TopicSpec::Names(names) => names.clone(),
            TopicSpec::Count(n) => (0..*n)
                .map(|i| format!("background_{}", offset + i))
                .collect(),
        };

        let groups = Self {
            specific,
            background,
        };
        groups.check_unique()?;

        debug!(
            specific = groups.n_specific(),
            background = groups.n_background(),
            "Resolved topic names"
        );
        Ok(groups)
    }

    pub fn n_specific(&self) -> usize {
        self.specific.len()
    }

    pub fn n_background(&self) -> usize {
        self.background.len()
    }

    /// Background regularizers are only attached when this is true.
    pub fn has_background(&self) -> bool {
        !self.background.is_empty()
    }

    /// Specific names first, then background.
    pub fn all_names(&self) -> Vec<String> {
        self.specific
            .iter()
            .chain(self.background.iter())
            .cloned()
            .collect()
    }

    fn check_unique(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for name in self.specific.iter().chain(self.background.iter()) {
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateTopicName(name.clone()));
            }
        }
        Ok(())
    }
}
