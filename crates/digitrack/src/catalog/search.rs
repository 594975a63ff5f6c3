use super::record::CatalogRecord;
use super::stage::Stage;

/// Listing filter for catalog queries.
#[derive(Debug, Default, Clone)]
pub struct CatalogFilter {
    /// Case-insensitive substring matched against file, book and author names.
    pub search: Option<String>,
    pub stage: Option<Stage>,
    pub assignee: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl CatalogFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Default::default()
        }
    }
}

/// True when `term` occurs in the record's file, book or author name,
/// ignoring case. A blank term matches everything.
pub fn matches(record: &CatalogRecord, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [&record.file_name, &record.book_name, &record.author_name]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Applies the in-memory part of a filter (search term and paging) to
/// records already narrowed by stage and assignee.
pub fn apply(records: Vec<CatalogRecord>, filter: &CatalogFilter) -> Vec<CatalogRecord> {
    let term = filter.search.as_deref().unwrap_or("");
    records
        .into_iter()
        .filter(|r| matches(r, term))
        .skip(filter.offset.unwrap_or(0))
        .take(filter.limit.unwrap_or(usize::MAX))
        .collect()
}
