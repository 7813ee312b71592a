use std::collections::BTreeMap;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use tokio::sync::RwLock;

use crate::{error::Result, store::DocumentStore};

/// In-process store. Documents come back in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents held in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, collection: &str, mut document: Document) -> Result<ObjectId> {
        let id = match document.get_object_id("_id") {
            Ok(id) => id,
            Err(_) => {
                let id = ObjectId::new();
                document.insert("_id", id);
                id
            }
        };

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(id)
    }

    async fn find(&self, collection: &str, limit: i64) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        let docs = collections.get(collection).map(Vec::as_slice).unwrap_or_default();
        // A non-positive limit means "no limit", as with the MongoDB driver.
        let take = if limit > 0 { limit as usize } else { docs.len() };

        Ok(docs.iter().take(take).cloned().collect())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>> {
        Ok(self.collections.read().await.keys().cloned().collect())
    }
}
