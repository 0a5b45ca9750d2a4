use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Read the YAML file at `path` as a raw mapping.
fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;

    match yaml {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{}: top-level value is not a mapping",
            path.display()
        ))),
    }
}

/// Defaults for every known key, as a YAML mapping.
fn default_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default())
        .map_err(|e| AppError::Config(e.to_string()))?
    {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Other("default config is not a mapping".into())),
    }
}

/// Return the keys known to this version that the file does not define.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let defaults = default_mapping()?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add every missing key with its default value, keeping existing values and
/// unknown keys untouched. Returns the keys that were added.
pub fn migrate_config(path: &Path) -> AppResult<Vec<String>> {
    let mut current = read_mapping(path)?;
    let defaults = default_mapping()?;

    let mut added = Vec::new();
    for (k, v) in defaults {
        if !current.contains_key(&k) {
            if let Some(name) = k.as_str() {
                added.push(name.to_string());
            }
            current.insert(k, v);
        }
    }

    if added.is_empty() {
        info("Configuration file is up to date.");
        return Ok(added);
    }

    let serialized = serde_yaml::to_string(&Value::Mapping(current))
        .map_err(|e| AppError::Config(e.to_string()))?;
    fs::write(path, serialized)?;

    success(format!(
        "Configuration migrated: added {}",
        added.join(", ")
    ));

    Ok(added)
}
