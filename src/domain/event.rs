use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Event {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Calendar date of the event, `YYYY-MM-DD`.
    pub event_date: NaiveDate,
    #[serde(default)]
    pub location: Option<String>,
}
