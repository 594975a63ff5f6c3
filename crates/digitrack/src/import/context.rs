use std::path::PathBuf;

use crate::catalog::{CatalogRecord, KeySnapshot, NewCatalogRecord};
use crate::tabular::TabularRow;

use super::progress::ImportPhase;

pub struct ImportContext {
    // Input
    pub source: PathBuf,
    pub actor: Option<String>,

    pub phase: ImportPhase,

    // Taken once at the start; every reconciliation decision uses it.
    pub snapshot: KeySnapshot,
    pub existing_count: usize,

    // Reading result
    pub rows: Vec<TabularRow>,

    // Parsing results
    pub candidates: Vec<NewCatalogRecord>,
    pub rows_without_file_name: usize,

    // Reconciling results
    pub accepted: Vec<NewCatalogRecord>,
    pub duplicates: Vec<String>,

    // Inserting result
    pub inserted: Vec<CatalogRecord>,
}

impl ImportContext {
    pub fn new(source: PathBuf, actor: Option<String>) -> Self {
        Self {
            source,
            actor,
            phase: ImportPhase::Idle,
            snapshot: KeySnapshot::new(),
            existing_count: 0,
            rows: Vec::new(),
            candidates: Vec::new(),
            rows_without_file_name: 0,
            accepted: Vec::new(),
            duplicates: Vec::new(),
            inserted: Vec::new(),
        }
    }

    /// Moves to `next`, returning false (and staying put) when the
    /// transition is not allowed.
    pub fn enter(&mut self, next: ImportPhase) -> bool {
        if self.phase.can_transition_to(next) {
            self.phase = next;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_follows_allowed_transitions() {
        let mut ctx = ImportContext::new(PathBuf::from("catalog.csv"), None);
        assert!(ctx.enter(ImportPhase::Reading));
        assert!(ctx.enter(ImportPhase::Parsing));
        assert_eq!(ctx.phase, ImportPhase::Parsing);
    }

    #[test]
    fn test_enter_refuses_skipping_phases() {
        let mut ctx = ImportContext::new(PathBuf::from("catalog.csv"), None);
        assert!(!ctx.enter(ImportPhase::Inserting));
        assert_eq!(ctx.phase, ImportPhase::Idle);

        ctx.phase = ImportPhase::Failed;
        assert!(!ctx.enter(ImportPhase::Reading));
        assert_eq!(ctx.phase, ImportPhase::Failed);
    }
}
