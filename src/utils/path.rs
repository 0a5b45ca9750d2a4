//! Path utilities: expand ~, build export file names.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Replace every whitespace run in an event name with a single `_`.
pub fn slug_event_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}
