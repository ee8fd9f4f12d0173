// src/record.rs
//! Structured output of the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ingest::types::Timestamp;

/// Mutually exclusive category of a calendar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Match,
    Ticketing,
    Other,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Match => "match",
            EventType::Ticketing => "ticketing",
            EventType::Other => "other",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured event. Built once per `RawEntry`, never mutated afterwards.
///
/// `sport`, `squad_label`, `benfica_home`, `opponent` and `broadcast` are only ever
/// populated for [`EventType::Match`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub uid: String,
    pub source_name: String,
    pub event_type: EventType,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
    pub title: String,
    pub body: String,
    pub venue_name: String,

    pub sport: Option<String>,
    pub squad_label: Option<String>,
    pub benfica_home: Option<bool>,
    pub opponent: Option<String>,

    pub competition: Option<String>,
    pub season: Option<String>,
    pub matchday: Option<u64>,

    pub ticket_url: Option<String>,
    pub broadcast: Option<String>,
}

/// Stable sort by start time, ascending; entries without a start go last.
pub fn sort_by_start(records: &mut [EventRecord]) {
    records.sort_by_key(|r| (r.start.is_none(), r.start));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn rec(uid: &str, hour: Option<u32>) -> EventRecord {
        let tz = FixedOffset::east_opt(0).unwrap();
        EventRecord {
            uid: uid.into(),
            source_name: "feed_0".into(),
            event_type: EventType::Other,
            start: hour.map(|h| tz.with_ymd_and_hms(2025, 11, 13, h, 0, 0).unwrap()),
            end: None,
            title: String::new(),
            body: String::new(),
            venue_name: String::new(),
            sport: None,
            squad_label: None,
            benfica_home: None,
            opponent: None,
            competition: None,
            season: None,
            matchday: None,
            ticket_url: None,
            broadcast: None,
        }
    }

    #[test]
    fn sort_puts_missing_start_last_and_keeps_ties_stable() {
        let mut v = vec![
            rec("none", None),
            rec("late", Some(20)),
            rec("tie-a", Some(9)),
            rec("tie-b", Some(9)),
        ];
        sort_by_start(&mut v);
        let order: Vec<_> = v.iter().map(|r| r.uid.as_str()).collect();
        assert_eq!(order, vec!["tie-a", "tie-b", "late", "none"]);
    }

    #[test]
    fn event_type_serializes_lowercase() {
        let s = serde_json::to_string(&EventType::Ticketing).unwrap();
        assert_eq!(s, "\"ticketing\"");
        assert_eq!(EventType::Match.to_string(), "match");
    }
}
