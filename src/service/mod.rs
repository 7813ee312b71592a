use std::sync::Arc;

use crate::{
    error::{AppError, Result},
    repository::{AnnouncementRepository, ContactMessageRepository, EventRepository},
    store::DocumentStore,
};

/// Long-lived handles shared by every request. The store is absent when the
/// service was started without database settings; handlers that need it
/// then fail with 503 while `/test` reports the degraded state.
pub struct ServiceContext {
    store: Option<Arc<dyn DocumentStore>>,
}

impl ServiceContext {
    pub fn new(store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> Option<&Arc<dyn DocumentStore>> {
        self.store.as_ref()
    }

    fn require_store(&self) -> Result<Arc<dyn DocumentStore>> {
        self.store
            .clone()
            .ok_or_else(|| AppError::ServiceUnavailable("Database not available".to_string()))
    }

    pub fn announcement_repo(&self) -> Result<AnnouncementRepository> {
        Ok(AnnouncementRepository::new(self.require_store()?))
    }

    pub fn event_repo(&self) -> Result<EventRepository> {
        Ok(EventRepository::new(self.require_store()?))
    }

    pub fn contact_repo(&self) -> Result<ContactMessageRepository> {
        Ok(ContactMessageRepository::new(self.require_store()?))
    }
}
