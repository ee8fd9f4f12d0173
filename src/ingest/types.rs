// src/ingest/types.rs
use anyhow::Result;
use chrono::{DateTime, FixedOffset};

/// Calendar timestamp, already normalized to the club's local time zone.
pub type Timestamp = DateTime<FixedOffset>;

/// One calendar component as delivered by a feed, before any extraction.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct RawEntry {
    pub uid: String,
    pub source_name: String, // e.g., "feed_0"
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
    pub title: String,    // SUMMARY, "" when missing
    pub body: String,     // DESCRIPTION, "" when missing
    pub location: String, // LOCATION, "" when missing
}

#[async_trait::async_trait]
pub trait FeedProvider: Send + Sync {
    async fn fetch_entries(&self) -> Result<Vec<RawEntry>>;
    fn name(&self) -> &str;
}
