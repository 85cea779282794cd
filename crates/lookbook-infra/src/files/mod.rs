//! One-document-per-post storage on the local filesystem.

mod maintenance;
mod repository;

pub use maintenance::{NormalizeReport, PruneReport};
pub use repository::{ExportReport, FileFailure, LoadOutcome, PostFileConfig, PostFileRepository};
