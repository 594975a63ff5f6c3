use crate::db::DatabaseError;

use super::reconciler::KeySnapshot;
use super::record::{Assignment, CatalogRecord, NewCatalogRecord};
use super::search::CatalogFilter;
use super::stage::Stage;

/// Persistence boundary of the catalog.
///
/// `insert_many` is all-or-nothing: either every record is stored or none
/// is and the error is returned.
pub trait CatalogStore: Send + Sync {
    /// Normalized keys of every record currently stored.
    fn existing_keys(&self) -> Result<KeySnapshot, DatabaseError>;

    /// Case-insensitive, whitespace-trimmed existence check.
    fn file_name_exists(&self, file_name: &str) -> Result<bool, DatabaseError>;

    fn insert_one(&self, record: &NewCatalogRecord) -> Result<CatalogRecord, DatabaseError>;

    fn insert_many(&self, records: &[NewCatalogRecord])
        -> Result<Vec<CatalogRecord>, DatabaseError>;

    fn list(&self, filter: &CatalogFilter) -> Result<Vec<CatalogRecord>, DatabaseError>;

    fn count(&self) -> Result<u64, DatabaseError>;

    fn find_by_file_name(&self, file_name: &str) -> Result<Option<CatalogRecord>, DatabaseError>;

    /// Returns the updated record, or `None` when no record matched.
    fn update_stage(
        &self,
        file_name: &str,
        stage: &Stage,
        actor: Option<&str>,
    ) -> Result<Option<CatalogRecord>, DatabaseError>;

    /// Returns the updated record, or `None` when no record matched.
    fn update_assignment(
        &self,
        file_name: &str,
        assignment: &Assignment,
        actor: Option<&str>,
    ) -> Result<Option<CatalogRecord>, DatabaseError>;
}
