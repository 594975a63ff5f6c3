use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigitrackError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Import error: {0}")]
    Import(#[from] crate::import::ImportError),

    #[error("Database error: {0}")]
    Database(#[from] crate::db::DatabaseError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },
}

/// Errors from single-record catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A required field is missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The file name is already present in the catalog.
    #[error("The file \"{0}\" already exists in the records")]
    Duplicate(String),

    /// No record carries the given file name.
    #[error("No record found for file \"{0}\"")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] crate::db::DatabaseError),
}

pub type Result<T> = std::result::Result<T, DigitrackError>;
