//! Test harness for isolated test execution.
//!
//! Each `TestHarness` owns a temporary directory holding input files, a
//! config directory and a file-backed catalog database.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use digitrack::config::Config;
use digitrack::import::ImportConfig;
use digitrack::{CatalogService, Database, Importer, Stage};

pub struct TestHarness {
    temp_dir: TempDir,
    pub input_dir: PathBuf,
    pub config_dir: PathBuf,
    pub database_path: PathBuf,
    database: Database,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();

        let input_dir = base.join("input");
        let config_dir = base.join("config");
        std::fs::create_dir_all(&input_dir).expect("Failed to create input dir");
        std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        let database_path = base.join("data").join("catalog.db");
        let database = Database::open(&database_path).expect("Failed to open test database");

        Self {
            temp_dir,
            input_dir,
            config_dir,
            database_path,
            database,
        }
    }

    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Handle onto the harness database; clones share one connection.
    pub fn database(&self) -> Database {
        self.database.clone()
    }

    /// Opens a second, independent connection to the same file.
    pub fn reopen_database(&self) -> Database {
        Database::open(&self.database_path).expect("Failed to reopen test database")
    }

    pub fn service(&self) -> CatalogService<Database> {
        CatalogService::new(self.database(), Stage::Pending)
    }

    pub fn importer(&self) -> Importer<Database> {
        Importer::new(self.database(), ImportConfig::default())
    }

    pub fn importer_with(&self, config: &Config) -> Importer<Database> {
        Importer::new(self.database(), config.import_config())
    }

    pub fn write_input(&self, filename: &str, content: &[u8]) -> PathBuf {
        let path = self.input_dir.join(filename);
        std::fs::write(&path, content).expect("Failed to write input file");
        path
    }

    pub fn write_text_input(&self, filename: &str, content: &str) -> PathBuf {
        self.write_input(filename, content.as_bytes())
    }

    pub fn write_config(&self, filename: &str, config: &Config) -> PathBuf {
        let path = self.config_dir.join(filename);
        let json = serde_json::to_string_pretty(config).expect("Failed to serialize config");
        std::fs::write(&path, json).expect("Failed to write config file");
        path
    }

    pub fn write_config_json(&self, filename: &str, json: &str) -> PathBuf {
        let path = self.config_dir.join(filename);
        std::fs::write(&path, json).expect("Failed to write config file");
        path
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
