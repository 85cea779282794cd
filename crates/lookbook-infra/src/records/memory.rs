//! In-memory store for create-only side records.
//!
//! Note: Data is lost on process restart.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use lookbook_core::domain::{Record, RecordId};
use lookbook_core::error::RepoError;
use lookbook_core::ports::RecordRepository;

struct Table<R> {
    records: Vec<R>,
    next_id: RecordId,
}

/// Auto-incrementing in-memory table, one per record type.
pub struct InMemoryRecordStore<R: Record> {
    table: RwLock<Table<R>>,
}

impl<R: Record> InMemoryRecordStore<R> {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                records: Vec::new(),
                next_id: 1,
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.records.len()
    }
}

impl<R: Record> Default for InMemoryRecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> RecordRepository<R> for InMemoryRecordStore<R> {
    async fn create(&self, draft: R::Draft) -> Result<R, RepoError> {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;

        let record = R::from_draft(id, draft, Utc::now());
        table.records.push(record.clone());

        tracing::debug!(kind = R::KIND, id, "Record created");
        Ok(record)
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<R>, RepoError> {
        let table = self.table.read().await;
        Ok(table.records.iter().find(|r| r.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<R>, RepoError> {
        Ok(self.table.read().await.records.clone())
    }

    async fn list_where(
        &self,
        filter: &(dyn for<'r> Fn(&'r R) -> bool + Send + Sync),
    ) -> Result<Vec<R>, RepoError> {
        let table = self.table.read().await;
        Ok(table.records.iter().filter(|r| filter(r)).cloned().collect())
    }
}
