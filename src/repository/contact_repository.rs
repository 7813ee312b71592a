use std::sync::Arc;

use mongodb::bson;

use crate::{domain::ContactMessage, error::Result, store::DocumentStore};

pub const COLLECTION: &str = "contactmessage";

/// Write-only: contact messages are read by staff straight from the database.
pub struct ContactMessageRepository {
    store: Arc<dyn DocumentStore>,
}

impl ContactMessageRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, message: ContactMessage) -> Result<String> {
        let id = self
            .store
            .insert_one(COLLECTION, bson::to_document(&message)?)
            .await?;

        tracing::debug!("Stored contact message {}", id);
        Ok(id.to_hex())
    }
}
