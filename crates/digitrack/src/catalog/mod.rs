pub mod reconciler;
pub mod record;
pub mod search;
pub mod service;
pub mod stage;
pub mod store;

pub use reconciler::{normalize_key, Admission, KeySnapshot, Reconciler};
pub use record::{Assignment, CatalogRecord, NewCatalogRecord, RecordOverrides};
pub use search::CatalogFilter;
pub use service::CatalogService;
pub use stage::Stage;
pub use store::CatalogStore;
