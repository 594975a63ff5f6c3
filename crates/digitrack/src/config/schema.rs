use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::Stage;
use crate::db::default_database_path;
use crate::import::ImportConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<String>,
    #[serde(default = "default_stage_label")]
    pub default_stage: String,
    #[serde(default = "default_max_import_rows")]
    pub max_import_rows: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_stage_label() -> String {
    Stage::Pending.label().to_string()
}

fn default_max_import_rows() -> usize {
    10_000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            database_path: None,
            default_stage: default_stage_label(),
            max_import_rows: default_max_import_rows(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Parsed default stage. Falls back to `Pending` for a blank label,
    /// which the loader already rejects.
    pub fn stage(&self) -> Stage {
        Stage::from_label(&self.default_stage).unwrap_or_default()
    }

    /// Catalog file location, expanding a leading `~/`.
    pub fn resolved_database_path(&self) -> Option<PathBuf> {
        match self.database_path.as_deref() {
            Some(path) => Some(expand_home(path)),
            None => default_database_path(),
        }
    }

    pub fn import_config(&self) -> ImportConfig {
        ImportConfig {
            default_stage: self.stage(),
            max_rows: self.max_import_rows,
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
