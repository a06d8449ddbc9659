use crate::models::{Collection, Document, InsertResult};
use crate::repositories::{DocumentRepository, RepositoryResult};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Read and append access to the opaque document collections.
pub struct DocumentService {
    repository: Arc<dyn DocumentRepository>,
}

impl DocumentService {
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, collection: Collection) -> RepositoryResult<Vec<Document>> {
        self.repository.list(collection).await
    }

    pub async fn insert(
        &self,
        collection: Collection,
        mut body: Map<String, Value>,
    ) -> RepositoryResult<InsertResult> {
        body.remove("_id");
        let id = self.repository.insert(collection, &body).await?;
        tracing::debug!(%collection, document_id = %id, "document inserted");
        Ok(InsertResult::new(id))
    }
}
