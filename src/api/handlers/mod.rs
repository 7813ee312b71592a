pub mod announcements;
pub mod contact;
pub mod events;
pub mod root;

use serde::Serialize;

/// Body returned by the create endpoints.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}
