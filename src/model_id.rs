// Model identifiers.
//
// Ids are fixed-width (26 chars) so they line up in listings: short ids are
// centered with '#' padding, long ones are cut. Inside a set of existing
// models a clash gets a "__<version>" suffix until it is free.

use std::collections::HashSet;

use chrono::{DateTime, Local, TimeZone};

pub const MODEL_NAME_LENGTH: usize = 26;

/// Pad or truncate an id to exactly `MODEL_NAME_LENGTH` characters.
pub fn pad_model_name(model_id: &str) -> String {
    let len = model_id.chars().count();
    if len >= MODEL_NAME_LENGTH {
        return model_id.chars().take(MODEL_NAME_LENGTH).collect();
    }
    let padding = MODEL_NAME_LENGTH - len;
    let left = padding / 2;
    let right = left + padding % 2;
    format!("{}{model_id}{}", "#".repeat(left), "#".repeat(right))
}

/// Timestamp label such as `14h05m09s_03d10m2026y`.
pub fn timestamp_label<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%Hh%Mm%Ss_%dd%mm%Yy").to_string()
}

/// Final id for a model: `candidate` (or a timestamp label when absent),
/// padded and versioned against the ids already in use.
pub fn assign_model_id(candidate: Option<&str>, existing: &HashSet<String>) -> String {
    match candidate {
        Some(id) => unique_model_id(id, existing),
        None => unique_model_id(&timestamp_label(&Local::now()), existing),
    }
}

/// Pad `candidate` and, if it is taken, try `<candidate>__1`, `<candidate>__2`,
/// ... until the padded result is not in `existing`.
///
/// The base is cut short when needed so the version suffix always fits.
pub fn unique_model_id(candidate: &str, existing: &HashSet<String>) -> String {
    let mut name = pad_model_name(candidate);
    let mut version = 0u64;
    while existing.contains(&name) {
        version += 1;
        let suffix = format!("__{version}");
        let room = MODEL_NAME_LENGTH.saturating_sub(suffix.len());
        let base: String = candidate.chars().take(room).collect();
        name = pad_model_name(&format!("{base}{suffix}"));
    }
    name
}
