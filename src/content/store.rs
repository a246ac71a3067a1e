//! In-memory document store
//!
//! Stand-in for the hosted document-store collaborator: collections of
//! JSON-field documents with opaque ids, listed in creation order. No
//! persistence; contents die with the process.

use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Collection name for academic subjects
pub const SUBJECTS_COLLECTION: &str = "subjects";

/// Collection name for placement problems
pub const PROBLEMS_COLLECTION: &str = "problems";

/// Errors from document-store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// No document with the given id in the collection
    #[error("Document not found: {0}")]
    NotFound(String),
}

/// One stored document: an opaque id plus arbitrary JSON fields
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Creation-ordered opaque id
    pub id: String,
    /// Document payload
    pub fields: serde_json::Value,
    /// Creation time, epoch seconds
    pub created_at: i64,
}

/// Collections of documents, listed in creation order
#[derive(Debug, Default)]
pub struct ContentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl ContentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// List all documents of a collection in creation order
    pub async fn list(&self, collection: &str) -> Vec<Document> {
        self.collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Create a document with a fresh id
    pub async fn create(&self, collection: &str, fields: serde_json::Value) -> Document {
        let document = Document {
            id: Uuid::new_v4().to_string(),
            fields,
            created_at: chrono::Utc::now().timestamp(),
        };
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document.clone());
        document
    }

    /// Replace the fields of an existing document
    pub async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: serde_json::Value,
    ) -> Result<Document, StoreError> {
        let mut collections = self.collections.write().await;
        let documents = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let document = documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        document.fields = fields;
        Ok(document.clone())
    }

    /// Delete a document by id
    pub async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let documents = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let before = documents.len();
        documents.retain(|d| d.id != id);
        if documents.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn listing_preserves_creation_order() {
        let store = ContentStore::new();
        let a = store.create("c", json!({"n": 1})).await;
        let b = store.create("c", json!({"n": 2})).await;

        let documents = store.list("c").await;
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].id, a.id);
        assert_eq!(documents[1].id, b.id);
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let store = ContentStore::new();
        let doc = store.create("c", json!({"title": "old"})).await;

        let updated = store
            .update("c", &doc.id, json!({"title": "new"}))
            .await
            .unwrap();
        assert_eq!(updated.fields["title"], "new");
        assert_eq!(store.list("c").await[0].fields["title"], "new");
    }

    #[tokio::test]
    async fn missing_document_is_not_found() {
        let store = ContentStore::new();
        store.create("c", json!({})).await;

        assert!(matches!(
            store.update("c", "nope", json!({})).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete("c", "nope").await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete("other", "nope").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let store = ContentStore::new();
        let a = store.create("c", json!({"n": 1})).await;
        let b = store.create("c", json!({"n": 2})).await;

        store.delete("c", &a.id).await.unwrap();
        let remaining = store.list("c").await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);
    }
}
