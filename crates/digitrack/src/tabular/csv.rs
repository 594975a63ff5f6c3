use std::path::Path;

use super::{TableReader, TabularError, TabularFormat, TabularRow};

/// Reads comma-separated files whose first line names the columns.
pub struct CsvReader;

impl CsvReader {
    pub fn new() -> Self {
        Self
    }

    /// Parses CSV from any reader; split out so tests need no file.
    pub fn read_from<R: std::io::Read>(&self, input: R) -> Result<Vec<TabularRow>, TabularError> {
        let mut reader = ::csv::ReaderBuilder::new()
            .flexible(true)
            .trim(::csv::Trim::Headers)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row: TabularRow = headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect();
            rows.push(row);
        }
        Ok(rows)
    }
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TableReader for CsvReader {
    fn read(&self, path: &Path) -> Result<Vec<TabularRow>, TabularError> {
        let file = std::fs::File::open(path).map_err(|e| TabularError::Io {
            path: crate::sanitize::redact_path(path),
            source: e,
        })?;
        self.read_from(file)
    }

    fn supports(&self, format: TabularFormat) -> bool {
        matches!(format, TabularFormat::Csv)
    }
}
