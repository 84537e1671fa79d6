// Plain-text dictionary dumps.
//
// The modeling library can save a dictionary as text: a header line with
// the dictionary name, a column line, then one comma-separated row per token:
//
//   name: lenta num_items: 2
//   token, class_id, token_value, token_tf, token_df
//   market, @lemmatized, 0.01, 120, 40
//   central_bank, @ngramms, 0.002, 15, 9
//
// Tokens may themselves contain ", ", so rows are split from the right.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use super::traits::{Dataset, Dictionary, DictionaryEntry};
use crate::error::ConfigError;

const COLUMNS: &str = "token, class_id, token_value, token_tf, token_df";

/// A dictionary held fully in memory.
#[derive(Debug, Clone, Default)]
pub struct TextDictionary {
    pub name: String,
    pub entries: Vec<DictionaryEntry>,
}

impl TextDictionary {
    pub fn new(name: impl Into<String>, entries: Vec<DictionaryEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Parse a text dump. Line numbers in errors are 1-based.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut lines = text.lines().enumerate();

        let name = match lines.next() {
            Some((_, header)) => parse_header(header)?,
            None => return Err(ConfigError::malformed_dictionary(1, "empty dictionary")),
        };

        match lines.next() {
            Some((_, columns)) if columns.trim() == COLUMNS => {}
            Some((_, columns)) => {
                return Err(ConfigError::malformed_dictionary(
                    2,
                    format!("unexpected column line {columns:?}"),
                ))
            }
            None => return Err(ConfigError::malformed_dictionary(2, "missing column line")),
        }

        let mut entries = Vec::new();
        for (idx, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            entries.push(parse_row(line, idx + 1)?);
        }

        Ok(Self { name, entries })
    }

    /// Read and parse a text dump from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dictionary {}", path.display()))?;
        let dictionary = Self::parse(&text)
            .with_context(|| format!("Failed to parse dictionary {}", path.display()))?;
        debug!(
            name = %dictionary.name,
            tokens = dictionary.entries.len(),
            "Loaded text dictionary"
        );
        Ok(dictionary)
    }
}

impl Dictionary for TextDictionary {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }
}

fn parse_header(line: &str) -> Result<String, ConfigError> {
    let rest = line
        .trim()
        .strip_prefix("name:")
        .ok_or_else(|| ConfigError::malformed_dictionary(1, "header must start with `name:`"))?;
    let name = match rest.find("num_items:") {
        Some(pos) => &rest[..pos],
        None => rest,
    };
    Ok(name.trim().to_string())
}

fn parse_row(line: &str, line_no: usize) -> Result<DictionaryEntry, ConfigError> {
    // rsplitn yields fields right to left: df, tf, value, class_id, token
    let fields: Vec<&str> = line.trim_end().rsplitn(5, ", ").collect();
    if fields.len() != 5 {
        return Err(ConfigError::malformed_dictionary(
            line_no,
            format!("expected 5 fields, found {}", fields.len()),
        ));
    }

    let number = |field: &str, what: &str| -> Result<f64, ConfigError> {
        field.trim().parse::<f64>().map_err(|_| {
            ConfigError::malformed_dictionary(line_no, format!("{what} is not a number: {field:?}"))
        })
    };

    Ok(DictionaryEntry {
        token: fields[4].to_string(),
        class_id: fields[3].trim().to_string(),
        token_value: number(fields[2], "token_value")?,
        token_tf: number(fields[1], "token_tf")?,
        token_df: number(fields[0], "token_df")?,
    })
}

/// A dataset that is nothing more than an already-built dictionary.
pub struct DictionaryDataset {
    dictionary: Arc<TextDictionary>,
}

impl DictionaryDataset {
    pub fn new(dictionary: TextDictionary) -> Self {
        Self {
            dictionary: Arc::new(dictionary),
        }
    }
}

impl Dataset for DictionaryDataset {
    fn get_dictionary(&self) -> Result<Arc<dyn Dictionary>> {
        Ok(self.dictionary.clone())
    }
}
