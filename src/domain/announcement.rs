use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Announcement {
    pub title: String,
    pub body: String,
    /// Publish timestamp; filled with the server time on creation when absent.
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub author: Option<String>,
}

impl Announcement {
    /// Applies the server-side publish default.
    pub fn published_or(mut self, now: DateTime<Utc>) -> Self {
        self.published_at.get_or_insert(now);
        self
    }
}
