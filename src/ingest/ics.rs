// src/ingest/ics.rs
//! ICS (iCalendar) decoding: one `RawEntry` per VEVENT.

use anyhow::{anyhow, Context, Result};
use chrono::{LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{
    Calendar, CalendarComponent, CalendarDateTime, Component, DatePerhapsTime, EventLike,
};

use crate::ingest::types::{RawEntry, Timestamp};

/// Time zone every feed timestamp is normalized to.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Lisbon;

/// Decode a whole calendar. A VEVENT without UID or DTSTART fails the feed.
pub fn decode_calendar(ics: &str, source_name: &str, tz: Tz) -> Result<Vec<RawEntry>> {
    let calendar = ics
        .parse::<Calendar>()
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("parsing ics for {source_name}"))?;

    let mut out = Vec::new();
    for component in &calendar.components {
        let CalendarComponent::Event(ev) = component else {
            continue;
        };

        let uid = ev
            .get_uid()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("{source_name}: VEVENT without UID"))?;
        let start = ev
            .get_start()
            .map(|d| to_timestamp(d, tz))
            .ok_or_else(|| anyhow!("{source_name}: VEVENT {uid} without DTSTART"))?;
        let end = ev.get_end().map(|d| to_timestamp(d, tz));

        out.push(RawEntry {
            uid,
            source_name: source_name.to_string(),
            start: Some(start),
            end,
            title: unescape_text(ev.get_summary().unwrap_or_default()),
            body: unescape_text(ev.get_description().unwrap_or_default()),
            location: unescape_text(ev.get_location().unwrap_or_default()),
        });
    }
    Ok(out)
}

/// Normalize any ICS date/time into `tz`.
/// Floating times are read as `tz` local time; all-day dates become local midnight.
pub fn to_timestamp(d: DatePerhapsTime, tz: Tz) -> Timestamp {
    match d {
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => {
            dt.with_timezone(&tz).fixed_offset()
        }
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => local(naive, tz),
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            let source_tz = tzid.parse::<Tz>().unwrap_or(tz);
            match source_tz.from_local_datetime(&date_time) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                    dt.with_timezone(&tz).fixed_offset()
                }
                LocalResult::None => Utc
                    .from_utc_datetime(&date_time)
                    .with_timezone(&tz)
                    .fixed_offset(),
            }
        }
        DatePerhapsTime::Date(date) => local(midnight(date), tz),
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}

fn local(naive: NaiveDateTime, tz: Tz) -> Timestamp {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.fixed_offset(),
        // Skipped by a DST jump: read the wall clock as UTC.
        LocalResult::None => Utc.from_utc_datetime(&naive).with_timezone(&tz).fixed_offset(),
    }
}

/// Undo RFC 5545 TEXT escaping (`\n`, `\,`, `\;`, `\\`).
pub fn unescape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
