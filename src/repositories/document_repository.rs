use super::user_repository::RepositoryResult;
use crate::models::document::{Collection, Document, DocumentRow};
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use uuid::Uuid;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait DocumentRepository: Send + Sync {
    async fn list(&self, collection: Collection) -> RepositoryResult<Vec<Document>>;
    async fn insert(
        &self,
        collection: Collection,
        body: &Map<String, Value>,
    ) -> RepositoryResult<String>;
}

pub struct SqliteDocumentRepository {
    pool: SqlitePool,
}

impl SqliteDocumentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for SqliteDocumentRepository {
    async fn list(&self, collection: Collection) -> RepositoryResult<Vec<Document>> {
        // Table names come from a closed enum, never from the request.
        let sql = format!(
            "SELECT id, body FROM {} ORDER BY rowid",
            collection.table_name()
        );

        let rows = sqlx::query_as::<_, DocumentRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(Document::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn insert(
        &self,
        collection: Collection,
        body: &Map<String, Value>,
    ) -> RepositoryResult<String> {
        let id = Uuid::new_v4().to_string();
        let sql = format!(
            "INSERT INTO {} (id, body) VALUES (?, ?)",
            collection.table_name()
        );

        sqlx::query(&sql)
            .bind(&id)
            .bind(serde_json::to_string(body)?)
            .execute(&self.pool)
            .await?;

        Ok(id)
    }
}
