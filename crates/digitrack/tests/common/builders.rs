//! Builders for creating test data programmatically.

#![allow(dead_code)]

use digitrack::config::Config;

/// Builds CSV import files with proper quoting.
pub struct CsvBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvBuilder {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Catalog sheet with the standard column headers.
    pub fn catalog() -> Self {
        Self::new(&["File Name", "Book Name", "Author Name", "Year", "Stage"])
    }

    pub fn row(mut self, cells: &[&str]) -> Self {
        self.rows.push(cells.iter().map(|c| c.to_string()).collect());
        self
    }

    /// Adds rows carrying only a file name; the other columns stay blank.
    pub fn file_names(mut self, names: &[&str]) -> Self {
        for name in names {
            let mut cells = vec![name.to_string()];
            cells.resize(self.headers.len(), String::new());
            self.rows.push(cells);
        }
        self
    }

    pub fn build(self) -> String {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        writer
            .write_record(&self.headers)
            .expect("Failed to write CSV header");
        for row in &self.rows {
            writer.write_record(row).expect("Failed to write CSV row");
        }
        let bytes = writer.into_inner().expect("Failed to flush CSV");
        String::from_utf8(bytes).expect("CSV is not UTF-8")
    }
}

/// Builds `Config` values.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn database_path(mut self, path: &str) -> Self {
        self.config.database_path = Some(path.to_string());
        self
    }

    pub fn default_stage(mut self, stage: &str) -> Self {
        self.config.default_stage = stage.to_string();
        self
    }

    pub fn max_import_rows(mut self, rows: usize) -> Self {
        self.config.max_import_rows = rows;
        self
    }

    pub fn log_level(mut self, level: &str) -> Self {
        self.config.log_level = level.to_string();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
