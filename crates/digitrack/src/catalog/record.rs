use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::stage::Stage;
use crate::filename::classify;

/// A work tracked through the digitization pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub id: String,
    pub file_name: String,
    pub book_name: String,
    pub author_name: String,
    pub year: String,
    pub stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digitized_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A record that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCatalogRecord {
    pub file_name: String,
    pub book_name: String,
    pub author_name: String,
    pub year: String,
    pub stage: Stage,
    pub assignee: Option<String>,
    pub scanned_by: Option<String>,
    pub digitized_by: Option<String>,
    pub created_by: Option<String>,
    pub last_edited_by: Option<String>,
    pub deadline: Option<NaiveDate>,
}

impl NewCatalogRecord {
    /// Builds a record entirely from its file name. A stage named by the
    /// file name wins over `default_stage`.
    pub fn from_file_name(file_name: &str, default_stage: &Stage) -> Self {
        let file_name = file_name.trim();
        let parsed = classify(file_name);
        Self {
            file_name: file_name.to_string(),
            book_name: parsed.book_name,
            author_name: parsed.author_name,
            year: parsed.year,
            stage: parsed.stage.unwrap_or_else(|| default_stage.clone()),
            assignee: None,
            scanned_by: None,
            digitized_by: None,
            created_by: None,
            last_edited_by: None,
            deadline: None,
        }
    }

    /// Stamps both identity fields with the acting user.
    pub fn edited_by(mut self, actor: Option<&str>) -> Self {
        self.created_by = actor.map(str::to_string);
        self.last_edited_by = actor.map(str::to_string);
        self
    }
}

/// Fields an explicit caller supplied; anything left `None` is derived
/// from the file name.
#[derive(Debug, Clone, Default)]
pub struct RecordOverrides {
    pub book_name: Option<String>,
    pub author_name: Option<String>,
    pub year: Option<String>,
    pub stage: Option<Stage>,
}

impl RecordOverrides {
    /// Applies the overrides onto a parsed record. Blank strings count as
    /// absent.
    pub fn apply(self, mut record: NewCatalogRecord) -> NewCatalogRecord {
        if let Some(book) = non_blank(self.book_name) {
            record.book_name = book;
        }
        if let Some(author) = non_blank(self.author_name) {
            record.author_name = author;
        }
        if let Some(year) = non_blank(self.year) {
            record.year = year;
        }
        if let Some(stage) = self.stage {
            record.stage = stage;
        }
        record
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Assignment fields that may be changed after creation.
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    pub assignee: Option<String>,
    pub scanned_by: Option<String>,
    pub digitized_by: Option<String>,
    pub deadline: Option<NaiveDate>,
}
