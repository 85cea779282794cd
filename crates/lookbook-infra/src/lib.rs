//! # Lookbook Infrastructure
//!
//! Concrete implementations of the ports defined in `lookbook-core`:
//! the in-memory post catalog (seeded or rebuilt from disk), the JSON file
//! repository, the reconciliation operations between the two and the
//! in-memory stores for side records.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - Catalog and file repository only
//! - `rate-limit` - Rate limiting via governor

pub mod catalog;
pub mod files;
pub mod reconcile;
pub mod records;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use catalog::{CatalogStore, FileBackedCatalog};
pub use files::{
    ExportReport, FileFailure, LoadOutcome, NormalizeReport, PostFileConfig, PostFileRepository,
    PruneReport,
};
pub use reconcile::{Rebuild, export_catalog_to_files, rebuild_catalog_from_files};
pub use records::InMemoryRecordStore;

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
