use thiserror::Error;

use crate::db::DatabaseError;
use crate::tabular::TabularError;

#[derive(Error, Debug)]
pub enum ImportError {
    /// The file type is outside the allow-list; nothing was read.
    #[error("Invalid file: unsupported type '.{0}' (expected .csv, .xlsx, .ods or .xls)")]
    Format(String),

    #[error("{0}")]
    Validation(String),

    #[error("Failed to read import file: {0}")]
    Read(TabularError),

    /// Snapshot read or bulk insert failed; nothing from the batch was stored.
    #[error("Import failed: {0}")]
    Storage(#[from] DatabaseError),
}

impl From<TabularError> for ImportError {
    fn from(err: TabularError) -> Self {
        match err {
            TabularError::UnsupportedFormat(ext) => ImportError::Format(ext),
            other => ImportError::Read(other),
        }
    }
}
