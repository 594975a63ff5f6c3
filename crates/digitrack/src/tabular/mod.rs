//! Readers turning uploaded tabular files into rows of named columns.

pub mod csv;
pub mod spreadsheet;

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

/// Tabular formats accepted for batch import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularFormat {
    Csv,
    Xlsx,
    Xls,
    Ods,
}

impl TabularFormat {
    /// Case-insensitive lookup; anything outside the allow-list is `None`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            "ods" => Some(Self::Ods),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Xls => "xls",
            Self::Ods => "ods",
        }
    }
}

#[derive(Error, Debug)]
pub enum TabularError {
    #[error("Unsupported file type '.{0}' (expected .csv, .xlsx, .ods or .xls)")]
    UnsupportedFormat(String),

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Malformed spreadsheet: {0}")]
    Spreadsheet(String),
}

/// One data row, keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularRow {
    cells: HashMap<String, String>,
}

impl TabularRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// First non-blank value among `aliases`, trimmed.
    pub fn first_of(&self, aliases: &[&str]) -> Option<String> {
        aliases
            .iter()
            .filter_map(|alias| self.get(alias))
            .map(str::trim)
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|v| v.trim().is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TabularRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

pub trait TableReader: Send + Sync {
    fn read(&self, path: &Path) -> Result<Vec<TabularRow>, TabularError>;
    fn supports(&self, format: TabularFormat) -> bool;
}

pub struct ReaderRegistry {
    readers: Vec<Box<dyn TableReader>>,
}

impl ReaderRegistry {
    pub fn new() -> Self {
        Self {
            readers: vec![
                Box::new(csv::CsvReader::new()),
                Box::new(spreadsheet::SpreadsheetReader::new()),
            ],
        }
    }

    /// Rejects files outside the allow-list without touching them.
    pub fn format_of(path: &Path) -> Result<TabularFormat, TabularError> {
        TabularFormat::from_path(path).ok_or_else(|| {
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            TabularError::UnsupportedFormat(ext.to_string())
        })
    }

    /// Reads all data rows, skipping rows whose every cell is blank.
    pub fn read(&self, path: &Path) -> Result<Vec<TabularRow>, TabularError> {
        let format = Self::format_of(path)?;

        for reader in &self.readers {
            if reader.supports(format) {
                let rows = reader.read(path)?;
                return Ok(rows.into_iter().filter(|r| !r.is_blank()).collect());
            }
        }

        Err(TabularError::UnsupportedFormat(format.extension().to_string()))
    }
}

impl Default for ReaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
