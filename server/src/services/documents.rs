//! Document store — full-text search over documentation chunks.
//!
//! DESIGN
//! ======
//! Retrieval ranking is delegated to Postgres: a web-search style query over
//! the `content` column, capped by the caller's limit. The trait seam keeps
//! the RAG service testable without a database.

use serde_json::Value;
use sqlx::PgPool;

const SEARCH_SQL: &str = "SELECT id, content, metadata FROM documents \
     WHERE to_tsvector('simple', content) @@ websearch_to_tsquery('simple', $1) \
     LIMIT $2";

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("document search failed: {0}")]
    Search(#[from] sqlx::Error),
}

/// One retrieved chunk: `{id, content, metadata: {title?, path?}}`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct DocumentChunk {
    pub id: i64,
    pub content: String,
    pub metadata: Value,
}

impl DocumentChunk {
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.metadata_str("title")
    }

    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.metadata_str("path")
    }

    fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return up to `limit` chunks relevant to `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying search fails.
    async fn search(&self, query: &str, limit: i64) -> Result<Vec<DocumentChunk>, DocumentError>;
}

/// Postgres-backed store over the `documents` table.
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl DocumentStore for PgDocumentStore {
    async fn search(&self, query: &str, limit: i64) -> Result<Vec<DocumentChunk>, DocumentError> {
        let rows = sqlx::query_as::<_, DocumentChunk>(SEARCH_SQL)
            .bind(query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
#[path = "documents_test.rs"]
mod tests;
