// Process-local repository backing the tests

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::DocumentRepository;
use crate::models::DocumentRecord;
use crate::types::AppResult;

#[derive(Default)]
pub struct InMemoryDocumentRepository {
    records: Mutex<Vec<DocumentRecord>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record, oldest first.
    pub async fn records(&self) -> Vec<DocumentRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn insert(&self, text: &str) -> AppResult<DocumentRecord> {
        let mut records = self.records.lock().await;
        let record = DocumentRecord {
            id: records.len() as i64 + 1,
            text: text.to_string(),
            created_at: Utc::now(),
        };
        records.push(record.clone());

        Ok(record)
    }

    async fn latest(&self) -> AppResult<Option<DocumentRecord>> {
        Ok(self.records.lock().await.last().cloned())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.records.lock().await.len() as i64)
    }
}
