//! Column aliases recognized in import files and the mapping from a row to
//! a catalog record.

use crate::catalog::{NewCatalogRecord, RecordOverrides, Stage};
use crate::tabular::TabularRow;

pub const FILE_NAME: &[&str] = &["File Name", "file_name"];
pub const BOOK_NAME: &[&str] = &["Book Name", "book_name"];
pub const AUTHOR_NAME: &[&str] = &["Author Name", "author_name"];
pub const YEAR: &[&str] = &["Year", "year"];
pub const STAGE: &[&str] = &["Stage", "stage"];

/// Builds a candidate record from one row.
///
/// Returns `None` when the row has no file name. Explicit columns win over
/// values parsed from the file name; the stage falls back to the file
/// name's fourth token and then to `default_stage`.
pub fn record_from_row(
    row: &TabularRow,
    default_stage: &Stage,
    actor: Option<&str>,
) -> Option<NewCatalogRecord> {
    let file_name = row.first_of(FILE_NAME)?;

    let overrides = RecordOverrides {
        book_name: row.first_of(BOOK_NAME),
        author_name: row.first_of(AUTHOR_NAME),
        year: row.first_of(YEAR),
        stage: row.first_of(STAGE).and_then(|s| Stage::from_label(&s)),
    };

    let parsed = NewCatalogRecord::from_file_name(&file_name, default_stage);
    Some(overrides.apply(parsed).edited_by(actor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filename::UNKNOWN_SENTINEL;

    fn row(pairs: &[(&str, &str)]) -> TabularRow {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_row_without_file_name_is_dropped() {
        let r = row(&[("Book Name", "Orphan"), ("File Name", "  ")]);
        assert!(record_from_row(&r, &Stage::Pending, None).is_none());
    }

    #[test]
    fn test_parsed_fields_fill_missing_columns() {
        let r = row(&[("file_name", "A-1999")]);
        let record = record_from_row(&r, &Stage::Pending, Some("amina")).unwrap();
        assert_eq!(record.book_name, "A");
        assert_eq!(record.author_name, UNKNOWN_SENTINEL);
        assert_eq!(record.year, "1999");
        assert_eq!(record.stage, Stage::Pending);
        assert_eq!(record.created_by.as_deref(), Some("amina"));
    }

    #[test]
    fn test_explicit_columns_take_precedence() {
        let r = row(&[
            ("File Name", "Kitab-Lekhak-2005-Scanning"),
            ("Author Name", "Proper Author"),
            ("year", "2006"),
            ("Stage", "PDF Pages"),
        ]);
        let record = record_from_row(&r, &Stage::Pending, None).unwrap();
        assert_eq!(record.book_name, "Kitab");
        assert_eq!(record.author_name, "Proper Author");
        assert_eq!(record.year, "2006");
        assert_eq!(record.stage, Stage::PdfPages);
    }

    #[test]
    fn test_stage_inferred_from_fourth_token() {
        let r = row(&[("File Name", "Kitab_Jo_Naam-Lekhak_Jo_Naam-2005-Scanning")]);
        let record = record_from_row(&r, &Stage::Pending, None).unwrap();
        assert_eq!(record.book_name, "Kitab Jo Naam");
        assert_eq!(record.author_name, "Lekhak Jo Naam");
        assert_eq!(record.year, "2005");
        assert_eq!(record.stage, Stage::Scanning);
    }

    #[test]
    fn test_file_name_is_trimmed() {
        let r = row(&[("File Name", "  Padded-Name  ")]);
        let record = record_from_row(&r, &Stage::Pending, None).unwrap();
        assert_eq!(record.file_name, "Padded-Name");
    }
}
