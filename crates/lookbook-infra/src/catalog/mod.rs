//! Post catalog implementations - seeded in-memory and file-backed.

mod file_backed;
mod memory;
mod seed;

pub use file_backed::FileBackedCatalog;
pub use memory::CatalogStore;
