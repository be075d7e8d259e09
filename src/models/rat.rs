use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Title every rat post embed carries; reports are only accepted for these.
pub const RAT_EMBED_TITLE: &str = "Rat";

#[derive(Debug, Serialize, Clone)]
pub struct RatReport {
    pub id: String,
    pub link: String,
    pub reported_by: String,
    pub reported_at: DateTime<Utc>,
}

impl RatReport {
    pub fn new(link: &str, reported_by: &str, reported_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            link: link.to_string(),
            reported_by: reported_by.to_string(),
            reported_at,
        }
    }
}
