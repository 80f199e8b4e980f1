//! Document storage
//!
//! Records are appended through a [`DocumentRepository`]. [`DocumentStore`]
//! keeps an explicit reference to the current document, replaced only by
//! successful saves. Concurrent uploads race on that reference and the last
//! save to complete wins.

pub mod memory;

pub use memory::InMemoryDocumentRepository;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::models::{DocumentRecord, RecordId};
use crate::types::AppResult;

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Persist a new record and return it with its assigned id.
    async fn insert(&self, text: &str) -> AppResult<DocumentRecord>;

    /// The record with the greatest id, if any.
    async fn latest(&self) -> AppResult<Option<DocumentRecord>>;

    async fn count(&self) -> AppResult<i64>;
}

pub struct DocumentStore {
    repository: Arc<dyn DocumentRepository>,
    current: RwLock<Option<Arc<DocumentRecord>>>,
}

impl DocumentStore {
    /// Open the store, picking up the newest persisted record as current.
    pub async fn open(repository: Arc<dyn DocumentRepository>) -> AppResult<Self> {
        let current = repository.latest().await?.map(Arc::new);
        let stored = repository.count().await?;
        match &current {
            Some(record) => info!(
                "Current document restored (id {}, {} stored in total)",
                record.id, stored
            ),
            None => info!("No stored documents yet"),
        }

        Ok(Self {
            repository,
            current: RwLock::new(current),
        })
    }

    pub async fn save(&self, text: &str) -> AppResult<RecordId> {
        let record = self.repository.insert(text).await?;
        let id = record.id;
        debug!("Saved document {} ({} characters)", id, record.text.len());

        *self.current.write().await = Some(Arc::new(record));
        Ok(id)
    }

    pub async fn fetch_latest(&self) -> Option<Arc<DocumentRecord>> {
        self.current.read().await.clone()
    }

    pub async fn record_count(&self) -> AppResult<i64> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AppError;

    /// Serves existing records but rejects every insert.
    struct ReadOnlyRepository {
        inner: InMemoryDocumentRepository,
    }

    #[async_trait]
    impl DocumentRepository for ReadOnlyRepository {
        async fn insert(&self, _text: &str) -> AppResult<DocumentRecord> {
            Err(AppError::Database(sqlx::Error::PoolClosed))
        }

        async fn latest(&self) -> AppResult<Option<DocumentRecord>> {
            self.inner.latest().await
        }

        async fn count(&self) -> AppResult<i64> {
            self.inner.count().await
        }
    }

    #[tokio::test]
    async fn test_empty_store_has_no_current_document() {
        let store = DocumentStore::open(Arc::new(InMemoryDocumentRepository::new()))
            .await
            .unwrap();

        assert!(store.fetch_latest().await.is_none());
        assert_eq!(store.record_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_latest_save_becomes_current() {
        let store = DocumentStore::open(Arc::new(InMemoryDocumentRepository::new()))
            .await
            .unwrap();

        let first = store.save("first").await.unwrap();
        let second = store.save("second").await.unwrap();
        let third = store.save("third").await.unwrap();
        assert!(first < second && second < third);

        let current = store.fetch_latest().await.unwrap();
        assert_eq!(current.id, third);
        assert_eq!(current.text, "third");
        assert_eq!(store.record_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_open_restores_newest_record() {
        let repository = Arc::new(InMemoryDocumentRepository::new());
        repository.insert("old").await.unwrap();
        repository.insert("new").await.unwrap();

        let store = DocumentStore::open(repository).await.unwrap();
        assert_eq!(store.fetch_latest().await.unwrap().text, "new");
        assert_eq!(store.record_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_previous_current() {
        let inner = InMemoryDocumentRepository::new();
        let existing = inner.insert("kept").await.unwrap();
        let store = DocumentStore::open(Arc::new(ReadOnlyRepository { inner }))
            .await
            .unwrap();
        assert_eq!(store.fetch_latest().await.unwrap().id, existing.id);

        let err = store.save("lost").await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));

        let current = store.fetch_latest().await.unwrap();
        assert_eq!(*current, existing);
        assert_eq!(store.record_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_text_is_stored() {
        let store = DocumentStore::open(Arc::new(InMemoryDocumentRepository::new()))
            .await
            .unwrap();

        store.save("").await.unwrap();
        assert_eq!(store.fetch_latest().await.unwrap().text, "");
    }
}
