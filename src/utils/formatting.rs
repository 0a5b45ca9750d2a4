//! Formatting utilities used for CLI and export outputs.

/// Percentage with one decimal, e.g. `40.0%`.
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// `Yes` / `No` as used in report cells.
pub fn describe_flag(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Cut a string to `max` visible chars, appending `...` when truncated.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
