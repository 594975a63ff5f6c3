use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Phase of a batch import.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImportPhase {
    Idle,
    Reading,
    Parsing,
    Reconciling,
    Inserting,
    Failed,
}

impl ImportPhase {
    /// `Idle → Reading → Parsing → Reconciling → Inserting → Idle`, with
    /// `Reconciling → Idle` when nothing is new and `→ Failed` from any
    /// working phase.
    pub fn can_transition_to(self, next: ImportPhase) -> bool {
        use ImportPhase::*;
        matches!(
            (self, next),
            (Idle, Reading)
                | (Reading, Parsing)
                | (Parsing, Reconciling)
                | (Reconciling, Inserting)
                | (Reconciling, Idle)
                | (Inserting, Idle)
                | (Idle | Reading | Parsing | Reconciling | Inserting, Failed)
                | (Failed, Idle)
        )
    }
}

impl std::fmt::Display for ImportPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportPhase::Idle => write!(f, "Idle"),
            ImportPhase::Reading => write!(f, "Reading"),
            ImportPhase::Parsing => write!(f, "Parsing"),
            ImportPhase::Reconciling => write!(f, "Reconciling"),
            ImportPhase::Inserting => write!(f, "Inserting"),
            ImportPhase::Failed => write!(f, "Failed"),
        }
    }
}

/// Events emitted by the importer while it runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Phase {
        phase: ImportPhase,
        message: String,
    },
    DuplicateSkipped {
        file_name: String,
    },
    Completed {
        inserted: usize,
        duplicates: usize,
    },
    NoNewRecords {
        duplicates: usize,
    },
    Failed {
        error: String,
    },
}

pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// No-op reporter for unit tests.
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Forwards progress events to `tracing`.
pub struct TracingProgress;

impl ProgressReporter for TracingProgress {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Phase { phase, message } => info!(%phase, "{}", message),
            ProgressEvent::DuplicateSkipped { file_name } => {
                info!(file_name = %file_name, "Skipping duplicate")
            }
            ProgressEvent::Completed {
                inserted,
                duplicates,
            } => info!(inserted, duplicates, "Import completed"),
            ProgressEvent::NoNewRecords { duplicates } => {
                info!(duplicates, "No new records to import")
            }
            ProgressEvent::Failed { error } => warn!("Import failed: {}", error),
        }
    }
}
