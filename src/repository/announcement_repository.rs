use std::sync::Arc;

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use crate::{domain::Announcement, error::Result, store::DocumentStore};

pub const COLLECTION: &str = "announcement";

/// Stored shape of an announcement. `_id` lives here and never reaches
/// [`Announcement`].
#[derive(Debug, Serialize, Deserialize)]
struct AnnouncementDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    title: String,
    body: String,
    published_at: Option<bson::DateTime>,
    author: Option<String>,
}

impl From<Announcement> for AnnouncementDocument {
    fn from(announcement: Announcement) -> Self {
        Self {
            id: None,
            title: announcement.title,
            body: announcement.body,
            published_at: announcement.published_at.map(bson::DateTime::from_chrono),
            author: announcement.author,
        }
    }
}

impl From<AnnouncementDocument> for Announcement {
    fn from(doc: AnnouncementDocument) -> Self {
        Self {
            title: doc.title,
            body: doc.body,
            published_at: doc.published_at.map(|dt| dt.to_chrono()),
            author: doc.author,
        }
    }
}

pub struct AnnouncementRepository {
    store: Arc<dyn DocumentStore>,
}

impl AnnouncementRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn document_to_announcement(doc: Document) -> Result<Announcement> {
        let stored: AnnouncementDocument = bson::from_document(doc)?;
        Ok(stored.into())
    }

    /// Stores the announcement, stamping `published_at` with `now` when the
    /// caller left it empty. Returns the store-assigned id.
    pub async fn create(&self, announcement: Announcement, now: DateTime<Utc>) -> Result<String> {
        let document = AnnouncementDocument::from(announcement.published_or(now));
        let id = self
            .store
            .insert_one(COLLECTION, bson::to_document(&document)?)
            .await?;

        tracing::debug!("Created announcement {}", id);
        Ok(id.to_hex())
    }

    pub async fn list(&self, limit: i64) -> Result<Vec<Announcement>> {
        self.store
            .find(COLLECTION, limit)
            .await?
            .into_iter()
            .map(Self::document_to_announcement)
            .collect()
    }
}
