// src/analyze/mod.rs
//! Extraction pipeline entry: turns a `RawEntry` into an `EventRecord`.
//!
//! Order:
//! 1) Body header (competition / season / matchday), needed by the ticketing gate
//! 2) Ticketing classifier; ticketing entries short-circuit with only a ticket URL scan
//! 3) Title parser (pairing, home/away, sport, squad, broadcast)
//! 4) Fallback enricher (football heuristics + ticket URL)

pub mod body;
pub mod enrich;
pub mod ticketing;
pub mod title;
pub mod vocabulary;

use anyhow::Result;
use regex::Regex;

use crate::ingest::types::RawEntry;
use crate::record::{EventRecord, EventType};

// Re-export convenient types.
pub use crate::analyze::body::BodyHeader;
pub use crate::analyze::enrich::{extract_ticket_url, Enrichment};
pub use crate::analyze::ticketing::classify_ticketing;
pub use crate::analyze::title::TitleInfo;
pub use crate::analyze::vocabulary::Vocabulary;

/// Regexes shared by the stages, compiled once at startup.
#[derive(Debug)]
struct Patterns {
    leading_symbols: Regex,
    whitespace: Regex,
    matchday: Regex,
    season_only: Regex,
    spaced_header: Regex,
}

impl Patterns {
    fn compile() -> Result<Self> {
        fn re(id: &str, pattern: &str) -> Result<Regex> {
            Regex::new(pattern).map_err(|e| anyhow::anyhow!("pattern `{id}` regex error: {e}"))
        }
        Ok(Self {
            // Emoji / symbols in front of the first team name.
            leading_symbols: re("leading_symbols", r"^[^\p{L}\p{N}_]+")?,
            whitespace: re("whitespace", r"\s+")?,
            matchday: re("matchday", r"Jornada\s+([0-9]+)")?,
            season_only: re("season_only", r"^(?:[0-9]{2}|[0-9]{4})/[0-9]{2}$")?,
            spaced_header: re(
                "spaced_header",
                r"^(?P<comp>.+?)\s+(?P<season>[0-9]{2}/[0-9]{2}|[0-9]{4}/[0-9]{2})(?:\s*-\s*Jornada\s+(?P<j>[0-9]+))?$",
            )?,
        })
    }
}

/// Holds the vocabulary and compiled patterns. Stateless between entries, so one
/// instance can be shared across threads.
#[derive(Debug)]
pub struct EventParser {
    vocab: Vocabulary,
    patterns: Patterns,
}

impl EventParser {
    pub fn new(vocab: Vocabulary) -> Result<Self> {
        let vocab = vocab.normalized();
        vocab.validate()?;
        let patterns = Patterns::compile()?;
        Ok(Self { vocab, patterns })
    }

    /// Parser over the built-in Portuguese vocabulary.
    pub fn with_defaults() -> Result<Self> {
        Self::new(Vocabulary::default())
    }

    /// Resolve the vocabulary from env/config (see [`Vocabulary::load`]).
    pub fn from_config() -> Result<Self> {
        Self::new(Vocabulary::load()?)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Full single-entry transformation. Never fails: unknown fields stay `None`.
    pub fn parse_entry(&self, entry: &RawEntry) -> EventRecord {
        let header = self.parse_body_header(&entry.body);

        let mut record = EventRecord {
            uid: entry.uid.clone(),
            source_name: entry.source_name.clone(),
            event_type: EventType::Other,
            start: entry.start,
            end: entry.end,
            title: entry.title.clone(),
            body: entry.body.clone(),
            venue_name: entry.location.clone(),
            sport: None,
            squad_label: None,
            benfica_home: None,
            opponent: None,
            competition: header.competition,
            season: header.season,
            matchday: header.matchday,
            ticket_url: None,
            broadcast: None,
        };

        if classify_ticketing(&entry.title, &entry.body, record.competition.as_deref()) {
            record.event_type = EventType::Ticketing;
            record.ticket_url = extract_ticket_url(&entry.body);
            tracing::debug!(target: "ecal::parse", uid = %entry.uid, "ticketing entry");
            return record;
        }

        let info = self.parse_title(&entry.title);
        let extra = self.enrich(
            info.event_type,
            info.sport,
            info.squad_label,
            &entry.title,
            record.competition.as_deref(),
            &entry.body,
        );

        record.event_type = info.event_type;
        record.benfica_home = info.benfica_home;
        record.opponent = info.opponent;
        record.broadcast = info.broadcast;
        record.sport = extra.sport;
        record.squad_label = extra.squad_label;
        record.ticket_url = extra.ticket_url;

        tracing::debug!(
            target: "ecal::parse",
            uid = %entry.uid,
            event_type = %record.event_type,
            sport = ?record.sport,
            opponent = ?record.opponent,
            "parsed entry"
        );
        record
    }

    /// Collapse whitespace runs to single spaces and trim.
    fn squash_whitespace(&self, s: &str) -> String {
        self.patterns.whitespace.replace_all(s.trim(), " ").into_owned()
    }
}

/// Treat blank extraction results as absent.
pub(crate) fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn entry(title: &str, body: &str) -> RawEntry {
        let tz = FixedOffset::east_opt(0).unwrap();
        RawEntry {
            uid: "uid-1".into(),
            source_name: "feed_0".into(),
            start: Some(tz.with_ymd_and_hms(2025, 11, 22, 18, 0, 0).unwrap()),
            end: None,
            title: title.into(),
            body: body.into(),
            location: "Estádio da Luz".into(),
        }
    }

    #[test]
    fn match_entry_gets_title_and_body_fields() {
        let p = EventParser::with_defaults().unwrap();
        let r = p.parse_entry(&entry(
            "⚽ SL Benfica x FC Porto | 📺 BTV",
            "Liga Portugal Betclic | 25/26 - Jornada 12\nInfo",
        ));
        assert_eq!(r.event_type, EventType::Match);
        assert_eq!(r.benfica_home, Some(true));
        assert_eq!(r.opponent.as_deref(), Some("FC Porto"));
        assert_eq!(r.broadcast.as_deref(), Some("📺 BTV"));
        assert_eq!(r.sport.as_deref(), Some("Futebol"));
        assert_eq!(r.squad_label.as_deref(), Some("Masculino"));
        assert_eq!(r.competition.as_deref(), Some("Liga Portugal Betclic"));
        assert_eq!(r.season.as_deref(), Some("25/26"));
        assert_eq!(r.matchday, Some(12));
        assert_eq!(r.venue_name, "Estádio da Luz");
    }

    #[test]
    fn ticketing_entry_keeps_competition_but_no_match_fields() {
        let p = EventParser::with_defaults().unwrap();
        let r = p.parse_entry(&entry(
            "🎫 Bilhetes ⚽ SL Benfica x Sporting",
            "Liga Portugal Betclic 25/26 - Jornada 9\nhttps://bilhetes.slbenfica.pt",
        ));
        assert_eq!(r.event_type, EventType::Ticketing);
        assert_eq!(r.competition.as_deref(), Some("Liga Portugal Betclic"));
        assert_eq!(r.matchday, Some(9));
        assert_eq!(r.ticket_url.as_deref(), Some("https://bilhetes.slbenfica.pt"));
        assert!(r.opponent.is_none() && r.benfica_home.is_none() && r.sport.is_none());
    }
}
