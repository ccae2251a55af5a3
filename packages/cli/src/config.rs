use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "vellum.config.json";

/// Vellum configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one JSON file per catalog entry
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Tracing filter used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Entry used when a command gets no --entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_entry: Option<String>,
}

fn default_store_dir() -> String {
    ".vellum".to_string()
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn get_store_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.store_dir)
    }

    /// The entry named on the command line, else the configured default
    pub fn resolve_entry(&self, entry: Option<&str>) -> Result<String> {
        entry
            .map(str::to_string)
            .or_else(|| self.default_entry.clone())
            .ok_or_else(|| {
                anyhow!(
                    "No entry given. Pass --entry or set defaultEntry in {}",
                    DEFAULT_CONFIG_NAME
                )
            })
    }

    /// File backing one catalog entry
    pub fn entry_path(&self, cwd: &str, entry: &str) -> PathBuf {
        self.get_store_dir(cwd).join(format!("{}.json", entry))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            log_filter: default_log_filter(),
            default_entry: None,
        }
    }
}
