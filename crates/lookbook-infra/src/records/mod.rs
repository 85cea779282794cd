//! Stores for side records (gallery, comments, subscribers, contact forms).

mod memory;

pub use memory::InMemoryRecordStore;
