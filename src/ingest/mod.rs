// src/ingest/mod.rs
pub mod config;
pub mod ics;
pub mod providers;
pub mod types;

use anyhow::Result;

use crate::analyze::EventParser;
use crate::ingest::types::{FeedProvider, RawEntry};
use crate::record::{sort_by_start, EventRecord};
use metrics::{counter, describe_counter, describe_histogram};
use once_cell::sync::OnceCell;
use rayon::prelude::*;

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ecal_entries_total", "Calendar entries decoded from feeds.");
        describe_counter!(
            "ecal_records_total",
            "Structured records produced, by event type."
        );
        describe_counter!(
            "ecal_provider_errors_total",
            "Feed fetch/decode errors."
        );
        describe_histogram!("ecal_decode_ms", "ICS decode time in milliseconds.");
    });
}

/// Convert a batch of entries (in parallel; output keeps input order) and sort it by start.
pub fn build_records(parser: &EventParser, entries: &[RawEntry]) -> Vec<EventRecord> {
    ensure_metrics_described();

    let mut records: Vec<EventRecord> = entries.par_iter().map(|e| parser.parse_entry(e)).collect();
    for r in &records {
        counter!("ecal_records_total", "event_type" => r.event_type.as_str()).increment(1);
    }
    sort_by_start(&mut records);
    records
}

/// Fetch every provider in order and build one sorted batch.
/// A provider error (fetch failure, VEVENT without UID/DTSTART) aborts the import
/// and is returned to the caller with the feed name attached.
pub async fn run_import(
    providers: &[Box<dyn FeedProvider>],
    parser: &EventParser,
) -> Result<Vec<EventRecord>> {
    ensure_metrics_described();

    let mut raw = Vec::new();
    for p in providers {
        let mut v = match p.fetch_entries().await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(target: "ecal::ingest", error = ?e, feed = p.name(), "provider error");
                counter!("ecal_provider_errors_total").increment(1);
                return Err(e.context(format!("feed {}", p.name())));
            }
        };
        tracing::info!(target: "ecal::ingest", feed = p.name(), entries = v.len(), "feed decoded");
        raw.append(&mut v);
    }

    Ok(build_records(parser, &raw))
}
