//! Single-record catalog operations: manual entry, stage transitions and
//! reassignment.

use tracing::{debug, info, info_span};

use crate::error::CatalogError;
use crate::sanitize;

use super::record::{Assignment, CatalogRecord, NewCatalogRecord, RecordOverrides};
use super::search::CatalogFilter;
use super::stage::Stage;
use super::store::CatalogStore;

pub struct CatalogService<S: CatalogStore> {
    store: S,
    default_stage: Stage,
}

impl<S: CatalogStore> CatalogService<S> {
    pub fn new(store: S, default_stage: Stage) -> Self {
        Self {
            store,
            default_stage,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds one record. The file name is trimmed and must be unique
    /// (ignoring case); explicit overrides replace the parsed fields.
    pub fn add_record(
        &self,
        file_name: &str,
        overrides: RecordOverrides,
        actor: Option<&str>,
    ) -> Result<CatalogRecord, CatalogError> {
        let clean = file_name.trim();
        if clean.is_empty() {
            return Err(CatalogError::Validation("File name is required".to_string()));
        }

        let _span = info_span!(
            "add_record",
            file_name = %sanitize::truncate_for_log(clean, 120)
        )
        .entered();

        if self.store.file_name_exists(clean)? {
            debug!("Rejected duplicate file name");
            return Err(CatalogError::Duplicate(clean.to_string()));
        }

        let draft = overrides
            .apply(NewCatalogRecord::from_file_name(clean, &self.default_stage))
            .edited_by(actor);

        let record = self.store.insert_one(&draft).map_err(|e| {
            if e.is_unique_violation() {
                CatalogError::Duplicate(clean.to_string())
            } else {
                CatalogError::Storage(e)
            }
        })?;

        info!(id = %record.id, stage = %record.stage, "Catalog record added");
        Ok(record)
    }

    pub fn list(&self, filter: &CatalogFilter) -> Result<Vec<CatalogRecord>, CatalogError> {
        Ok(self.store.list(filter)?)
    }

    pub fn get(&self, file_name: &str) -> Result<CatalogRecord, CatalogError> {
        self.store
            .find_by_file_name(file_name)?
            .ok_or_else(|| CatalogError::NotFound(file_name.trim().to_string()))
    }

    /// Moves a record to any pipeline stage. Labels outside the pipeline are
    /// rejected here; only file names and imports may carry them.
    pub fn set_stage(
        &self,
        file_name: &str,
        stage: Stage,
        actor: Option<&str>,
    ) -> Result<CatalogRecord, CatalogError> {
        if stage.is_custom() {
            let known = Stage::PIPELINE
                .iter()
                .map(|s| s.label().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(CatalogError::Validation(format!(
                "Unknown stage '{}'; expected one of: {}",
                stage, known
            )));
        }
        let record = self
            .store
            .update_stage(file_name, &stage, actor)?
            .ok_or_else(|| CatalogError::NotFound(file_name.trim().to_string()))?;
        info!(file_name = %record.file_name, stage = %record.stage, "Stage updated");
        Ok(record)
    }

    /// Moves a record one step forward along the pipeline.
    pub fn advance_stage(
        &self,
        file_name: &str,
        actor: Option<&str>,
    ) -> Result<CatalogRecord, CatalogError> {
        let current = self.get(file_name)?;
        let next = current.stage.next().ok_or_else(|| {
            CatalogError::Validation(format!(
                "Stage '{}' has no following stage",
                current.stage
            ))
        })?;
        self.set_stage(&current.file_name, next, actor)
    }

    pub fn assign(
        &self,
        file_name: &str,
        assignment: &Assignment,
        actor: Option<&str>,
    ) -> Result<CatalogRecord, CatalogError> {
        let record = self
            .store
            .update_assignment(file_name, assignment, actor)?
            .ok_or_else(|| CatalogError::NotFound(file_name.trim().to_string()))?;
        info!(file_name = %record.file_name, "Assignment updated");
        Ok(record)
    }
}
