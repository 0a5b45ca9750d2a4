use crate::ui::messages::warning;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub mod migrate; // submodule at src/config/migrate.rs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_event_name")]
    pub default_event_name: String,
    #[serde(default = "default_venue")]
    pub default_venue: String,
    /// Simulated network latency of a sync pulse, in milliseconds.
    #[serde(default = "default_sync_delay_ms")]
    pub sync_delay_ms: u64,
    /// Directory used for exports when no explicit --file is given ("." = cwd).
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    /// chrono format used when printing timestamps and in report cells.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
pub(crate) fn default_event_name() -> String {
    "My Event".to_string()
}
pub(crate) fn default_venue() -> String {
    "Virtual".to_string()
}
pub(crate) fn default_sync_delay_ms() -> u64 {
    1500
}
fn default_export_dir() -> String {
    ".".to_string()
}
fn default_date_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            default_event_name: default_event_name(),
            default_venue: default_venue(),
            sync_delay_ms: default_sync_delay_ms(),
            export_dir: default_export_dir(),
            date_format: default_date_format(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rcheckin")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rcheckin")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rcheckin.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rcheckin.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// An unreadable or malformed file is reported and replaced by defaults.
    pub fn load() -> Self {
        let path = Self::config_file();

        if !path.exists() {
            return Config::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    warning(format!(
                        "Configuration file {} is malformed ({e}); using defaults.",
                        path.display()
                    ));
                    Config::default()
                }
            },
            Err(e) => {
                warning(format!(
                    "Cannot read configuration file {} ({e}); using defaults.",
                    path.display()
                ));
                Config::default()
            }
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(&self, is_test: bool) -> io::Result<()> {
        let dir = Self::config_dir();

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(self).map_err(io::Error::other)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        let db_path = PathBuf::from(&self.database);
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(())
    }

    /// Resolve the export directory to an absolute path.
    pub fn export_dir_path(&self) -> io::Result<PathBuf> {
        let p = crate::utils::path::expand_tilde(&self.export_dir);
        if p.is_absolute() {
            Ok(p)
        } else {
            Ok(env::current_dir()?.join(p))
        }
    }
}
