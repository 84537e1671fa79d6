// Output formatting: terminal display of plans, weights, and topic names.

pub mod terminal;

/// Join names for a one-line listing, cut to `max_chars` characters
/// (never inside a multi-byte character) with "..." marking the cut.
pub fn name_list(names: &[String], max_chars: usize) -> String {
    if names.is_empty() {
        return "(none)".to_string();
    }
    let joined = names.join(", ");
    match joined.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &joined[..cut]),
        None => joined,
    }
}
