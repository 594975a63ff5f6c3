use std::path::{Path, PathBuf};

use crate::catalog::Stage;
use crate::config::schema::Config;
use crate::error::ConfigError;

const SCHEMA_JSON: &str = include_str!("../../../../schema/config-v1.json");

/// Location checked when no config file is named: `~/.digitrack/digitrack.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".digitrack").join("digitrack.json"))
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;

    validate_schema(&json_value)?;

    let config: Config = serde_json::from_value(json_value)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_schema(json_value: &serde_json::Value) -> Result<(), ConfigError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| ConfigError::Validation {
        message: format!("Failed to compile JSON schema: {}", e),
    })?;

    let error_messages: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| e.to_string())
        .collect();
    if !error_messages.is_empty() {
        return Err(ConfigError::SchemaValidation {
            errors: error_messages.join("; "),
        });
    }

    Ok(())
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    // New records must start somewhere on the known pipeline.
    match Stage::from_label(&config.default_stage) {
        Some(stage) if !stage.is_custom() => {}
        _ => {
            return Err(ConfigError::Validation {
                message: format!("Unknown default stage: '{}'", config.default_stage),
            })
        }
    }

    if config.max_import_rows == 0 {
        return Err(ConfigError::Validation {
            message: "max_import_rows must be greater than zero".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_minimal_config() {
        let config = load_config_from_str(r#"{ "version": "1.0" }"#).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.stage(), Stage::Pending);
        assert_eq!(config.max_import_rows, 10_000);
        assert!(config.database_path.is_none());
    }

    #[test]
    fn test_load_full_config() {
        let config_json = r#"
        {
            "version": "1.0",
            "database_path": "/data/catalog.db",
            "default_stage": "PDF Pages",
            "max_import_rows": 500,
            "log_level": "debug"
        }
        "#;

        let config = load_config_from_str(config_json).unwrap();
        assert_eq!(config.database_path.as_deref(), Some("/data/catalog.db"));
        assert_eq!(config.stage(), Stage::PdfPages);
        assert_eq!(config.max_import_rows, 500);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_configs() {
        let cases = [
            (r#"{ "version": "2.0" }"#, "unsupported version"),
            (r#"{ }"#, "missing version"),
            (r#"{ "version": "1.0", "max_import_rows": 0 }"#, "zero row limit"),
            (r#"{ "version": "1.0", "log_level": "loud" }"#, "unknown log level"),
            (r#"{ "version": "1.0", "extra": true }"#, "unknown field"),
        ];

        for (json, label) in cases {
            let result = load_config_from_str(json);
            assert!(
                matches!(result, Err(ConfigError::SchemaValidation { .. })),
                "expected schema failure for {}",
                label
            );
        }
    }

    #[test]
    fn test_unknown_default_stage_rejected() {
        let result = load_config_from_str(r#"{ "version": "1.0", "default_stage": "Binding" }"#);
        assert!(matches!(result, Err(ConfigError::Validation { .. })));

        let result = load_config_from_str(r#"{ "version": "1.0", "default_stage": "   " }"#);
        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_malformed_json() {
        let result = load_config_from_str("{ not json");
        assert!(matches!(result, Err(ConfigError::ParseJson(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/digitrack.json");
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }
}
