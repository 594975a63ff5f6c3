pub mod columns;
pub mod context;
pub mod error;
pub mod progress;
pub mod runner;

pub use columns::record_from_row;
pub use context::ImportContext;
pub use error::ImportError;
pub use progress::{ImportPhase, NoopProgress, ProgressEvent, ProgressReporter, TracingProgress};
pub use runner::{ImportConfig, ImportOutcome, ImportReport, Importer};
