pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod filename;
pub mod import;
pub mod sanitize;
pub mod tabular;

pub use catalog::{
    CatalogRecord, CatalogService, CatalogStore, KeySnapshot, NewCatalogRecord, Reconciler, Stage,
};
pub use config::{load_config, Config};
pub use db::Database;
pub use error::{CatalogError, ConfigError, DigitrackError, Result};
pub use filename::{
    classify, is_secondary_script, parse_and_translate, tokenize, BilingualFields,
    ParsedFileName, UNKNOWN_SENTINEL,
};
pub use import::{ImportConfig, ImportError, ImportOutcome, ImportReport, Importer};
