use std::sync::Arc;

use chrono::NaiveDate;
use mongodb::bson::{self, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use crate::{domain::Event, error::Result, store::DocumentStore};

pub const COLLECTION: &str = "event";

#[derive(Debug, Serialize, Deserialize)]
struct EventDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    title: String,
    description: Option<String>,
    // Kept as an ISO date string; BSON has no date-only type.
    event_date: NaiveDate,
    location: Option<String>,
}

impl From<Event> for EventDocument {
    fn from(event: Event) -> Self {
        Self {
            id: None,
            title: event.title,
            description: event.description,
            event_date: event.event_date,
            location: event.location,
        }
    }
}

impl From<EventDocument> for Event {
    fn from(doc: EventDocument) -> Self {
        Self {
            title: doc.title,
            description: doc.description,
            event_date: doc.event_date,
            location: doc.location,
        }
    }
}

pub struct EventRepository {
    store: Arc<dyn DocumentStore>,
}

impl EventRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn document_to_event(doc: Document) -> Result<Event> {
        let stored: EventDocument = bson::from_document(doc)?;
        Ok(stored.into())
    }

    pub async fn create(&self, event: Event) -> Result<String> {
        let document = EventDocument::from(event);
        let id = self
            .store
            .insert_one(COLLECTION, bson::to_document(&document)?)
            .await?;

        tracing::debug!("Created event {}", id);
        Ok(id.to_hex())
    }

    pub async fn list(&self, limit: i64) -> Result<Vec<Event>> {
        self.store
            .find(COLLECTION, limit)
            .await?
            .into_iter()
            .map(Self::document_to_event)
            .collect()
    }
}
