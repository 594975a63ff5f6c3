use std::path::Path;

use serde::Serialize;
use tracing::{debug, info_span, warn};

use crate::catalog::{Admission, CatalogStore, Reconciler, Stage};
use crate::sanitize;
use crate::tabular::{ReaderRegistry, TabularRow};

use super::columns::record_from_row;
use super::context::ImportContext;
use super::error::ImportError;
use super::progress::{ImportPhase, ProgressEvent, ProgressReporter};

/// Tunables for batch imports.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub default_stage: Stage,
    pub max_rows: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            default_stage: Stage::Pending,
            max_rows: 10_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportOutcome {
    Imported,
    NoNewRecords,
}

/// Summary of one import run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub source: String,
    pub outcome: ImportOutcome,
    pub total_rows: usize,
    pub inserted: usize,
    pub duplicates_skipped: usize,
    pub duplicate_file_names: Vec<String>,
    pub rows_without_file_name: usize,
    /// Catalog size re-read after the run. When the re-read fails it is
    /// estimated from the snapshot plus the rows inserted.
    pub catalog_size: u64,
}

pub struct Importer<S: CatalogStore> {
    store: S,
    registry: ReaderRegistry,
    config: ImportConfig,
}

impl<S: CatalogStore> Importer<S> {
    pub fn new(store: S, config: ImportConfig) -> Self {
        Self {
            store,
            registry: ReaderRegistry::new(),
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Imports every new row of a tabular file.
    ///
    /// The extension is checked before anything is read. Duplicate rows are
    /// skipped and counted; a storage failure aborts the whole batch.
    pub fn run(
        &self,
        path: &Path,
        actor: Option<&str>,
        progress: &dyn ProgressReporter,
    ) -> Result<ImportReport, ImportError> {
        let source = sanitize::redact_path(path);
        let _span = info_span!(
            "import",
            source = %source,
            actor = actor.unwrap_or("unknown")
        )
        .entered();

        let mut ctx = ImportContext::new(path.to_path_buf(), actor.map(str::to_string));

        if let Err(e) = ReaderRegistry::format_of(path) {
            return Err(self.fail(&mut ctx, progress, e.into()));
        }

        if let Err(e) = self.step_snapshot(&mut ctx) {
            return Err(self.fail(&mut ctx, progress, e));
        }

        {
            let _step = info_span!("read").entered();
            self.enter(&mut ctx, progress, ImportPhase::Reading, "Reading import file...");
            match self.registry.read(path) {
                Ok(rows) => ctx.rows = rows,
                Err(e) => return Err(self.fail(&mut ctx, progress, e.into())),
            }
        }

        self.process(ctx, progress)
    }

    /// Imports rows that were already read by the caller. The snapshot is
    /// taken here, at the start of the run.
    pub fn run_rows(
        &self,
        source: &str,
        rows: Vec<TabularRow>,
        actor: Option<&str>,
        progress: &dyn ProgressReporter,
    ) -> Result<ImportReport, ImportError> {
        let _span = info_span!("import", source = %source).entered();

        let mut ctx = ImportContext::new(source.into(), actor.map(str::to_string));
        if let Err(e) = self.step_snapshot(&mut ctx) {
            return Err(self.fail(&mut ctx, progress, e));
        }
        self.enter(&mut ctx, progress, ImportPhase::Reading, "Reading rows...");
        ctx.rows = rows;

        self.process(ctx, progress)
    }

    fn process(
        &self,
        mut ctx: ImportContext,
        progress: &dyn ProgressReporter,
    ) -> Result<ImportReport, ImportError> {
        if let Err(e) = self.step_validate_rows(&ctx) {
            return Err(self.fail(&mut ctx, progress, e));
        }

        {
            let _step = info_span!("parse").entered();
            self.enter(&mut ctx, progress, ImportPhase::Parsing, "Parsing rows...");
            self.step_parse(&mut ctx);
        }

        {
            let _step = info_span!("reconcile").entered();
            self.enter(
                &mut ctx,
                progress,
                ImportPhase::Reconciling,
                "Checking for duplicates...",
            );
            self.step_reconcile(&mut ctx, progress);
        }

        if ctx.accepted.is_empty() {
            progress.report(ProgressEvent::NoNewRecords {
                duplicates: ctx.duplicates.len(),
            });
            self.enter(&mut ctx, progress, ImportPhase::Idle, "Nothing new to import");
            return Ok(self.build_report(&ctx, ImportOutcome::NoNewRecords));
        }

        {
            let _step = info_span!("insert", count = ctx.accepted.len()).entered();
            self.enter(
                &mut ctx,
                progress,
                ImportPhase::Inserting,
                "Inserting new records...",
            );
            if let Err(e) = self.step_insert(&mut ctx) {
                return Err(self.fail(&mut ctx, progress, e));
            }
        }

        // The batch is committed from here on; nothing below may fail the run.
        let report = self.build_report(&ctx, ImportOutcome::Imported);

        progress.report(ProgressEvent::Completed {
            inserted: report.inserted,
            duplicates: report.duplicates_skipped,
        });
        self.enter(&mut ctx, progress, ImportPhase::Idle, "Import finished");
        Ok(report)
    }

    fn step_snapshot(&self, ctx: &mut ImportContext) -> Result<(), ImportError> {
        ctx.snapshot = self.store.existing_keys()?;
        ctx.existing_count = ctx.snapshot.len();
        debug!("Catalog snapshot holds {} keys", ctx.existing_count);
        Ok(())
    }

    fn step_validate_rows(&self, ctx: &ImportContext) -> Result<(), ImportError> {
        if ctx.rows.is_empty() {
            return Err(ImportError::Validation(
                "The import file contains no rows".to_string(),
            ));
        }
        if ctx.rows.len() > self.config.max_rows {
            return Err(ImportError::Validation(format!(
                "The import file has {} rows; at most {} are allowed",
                ctx.rows.len(),
                self.config.max_rows
            )));
        }
        Ok(())
    }

    fn step_parse(&self, ctx: &mut ImportContext) {
        let actor = ctx.actor.as_deref();
        for row in &ctx.rows {
            match record_from_row(row, &self.config.default_stage, actor) {
                Some(record) => ctx.candidates.push(record),
                None => ctx.rows_without_file_name += 1,
            }
        }
        if ctx.rows_without_file_name > 0 {
            debug!("Dropped {} rows without a file name", ctx.rows_without_file_name);
        }
    }

    fn step_reconcile(&self, ctx: &mut ImportContext, progress: &dyn ProgressReporter) {
        let mut reconciler = Reconciler::new(std::mem::take(&mut ctx.snapshot));
        for candidate in ctx.candidates.drain(..) {
            match reconciler.admit(&candidate.file_name) {
                Admission::Accepted => ctx.accepted.push(candidate),
                Admission::Duplicate => {
                    progress.report(ProgressEvent::DuplicateSkipped {
                        file_name: candidate.file_name.clone(),
                    });
                    ctx.duplicates.push(candidate.file_name);
                }
            }
        }
        debug!(
            "{} rows accepted, {} duplicates skipped",
            reconciler.accepted_count(),
            ctx.duplicates.len()
        );
    }

    fn step_insert(&self, ctx: &mut ImportContext) -> Result<(), ImportError> {
        ctx.inserted = self.store.insert_many(&ctx.accepted)?;
        Ok(())
    }

    fn build_report(&self, ctx: &ImportContext, outcome: ImportOutcome) -> ImportReport {
        let catalog_size = match self.store.count() {
            Ok(count) => count,
            Err(e) => {
                let estimate = (ctx.existing_count + ctx.inserted.len()) as u64;
                warn!(
                    "Could not re-count the catalog ({}); reporting {} records",
                    e, estimate
                );
                estimate
            }
        };
        ImportReport {
            source: sanitize::redact_path(&ctx.source),
            outcome,
            total_rows: ctx.rows.len(),
            inserted: ctx.inserted.len(),
            duplicates_skipped: ctx.duplicates.len(),
            duplicate_file_names: ctx.duplicates.clone(),
            rows_without_file_name: ctx.rows_without_file_name,
            catalog_size,
        }
    }

    fn enter(
        &self,
        ctx: &mut ImportContext,
        progress: &dyn ProgressReporter,
        phase: ImportPhase,
        message: &str,
    ) {
        let from = ctx.phase;
        let moved = ctx.enter(phase);
        debug_assert!(moved, "illegal import transition {} -> {}", from, phase);
        if !moved {
            warn!("Ignoring illegal import transition {} -> {}", from, phase);
            return;
        }
        progress.report(ProgressEvent::Phase {
            phase,
            message: message.to_string(),
        });
    }

    fn fail(
        &self,
        ctx: &mut ImportContext,
        progress: &dyn ProgressReporter,
        err: ImportError,
    ) -> ImportError {
        ctx.phase = ImportPhase::Failed;
        progress.report(ProgressEvent::Failed {
            error: err.to_string(),
        });
        err
    }
}
