// src/lib.rs
// Public library surface for the CLI and integration tests.

pub mod analyze;
pub mod ingest;
pub mod record;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{EventParser, Vocabulary};
pub use crate::ingest::types::{FeedProvider, RawEntry, Timestamp};
pub use crate::record::{sort_by_start, EventRecord, EventType};
