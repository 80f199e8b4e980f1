use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::DocumentRecord;
use crate::storage::DocumentRepository;
use crate::types::AppResult;

/// Append-only `documents` table.
#[derive(Clone)]
pub struct PgDocumentRepository {
    pool: PgPool,
}

impl PgDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn insert(&self, text: &str) -> AppResult<DocumentRecord> {
        let record = sqlx::query_as::<_, DocumentRecord>(
            r#"
            INSERT INTO documents (text)
            VALUES ($1)
            RETURNING id, text, created_at
            "#,
        )
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn latest(&self) -> AppResult<Option<DocumentRecord>> {
        let record = sqlx::query_as::<_, DocumentRecord>(
            r#"
            SELECT id, text, created_at FROM documents
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
