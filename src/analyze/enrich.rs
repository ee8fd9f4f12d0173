// src/analyze/enrich.rs
//! Fallback enrichment when the title did not name a sport, plus ticket URL lookup.

use crate::analyze::{EventParser, Vocabulary};
use crate::record::EventType;

const TICKET_BODY_KEYWORD: &str = "bilhete";
const FOOTBALL: &str = "Futebol";
const SQUAD_FEMININE: &str = "Feminino";
const SQUAD_MASCULINE: &str = "Masculino";

/// Final sport / squad / ticket URL for an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    pub sport: Option<String>,
    pub squad_label: Option<String>,
    pub ticket_url: Option<String>,
}

/// First body line (trimmed) starting with `http`.
pub fn extract_ticket_url(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .find(|line| line.starts_with("http"))
        .map(str::to_string)
}

impl EventParser {
    pub fn enrich(
        &self,
        event_type: EventType,
        sport: Option<String>,
        squad_label: Option<String>,
        title: &str,
        competition: Option<&str>,
        body: &str,
    ) -> Enrichment {
        let ticket_url = match event_type {
            EventType::Ticketing => extract_ticket_url(body),
            _ if body.to_lowercase().contains(TICKET_BODY_KEYWORD) => extract_ticket_url(body),
            _ => None,
        };

        let mut out = Enrichment {
            sport,
            squad_label,
            ticket_url,
        };
        if event_type != EventType::Match || out.sport.is_some() {
            return out;
        }

        let comp_lower = competition.unwrap_or_default().to_lowercase();
        if !self.looks_like_football(title, &comp_lower) {
            return out;
        }

        out.sport = Some(FOOTBALL.to_string());
        if out.squad_label.is_none() {
            let title_lower = title.to_lowercase();
            let feminine = Vocabulary::first_hit(&self.vocab.feminine, &comp_lower).is_some()
                || Vocabulary::first_hit(&self.vocab.feminine, &title_lower).is_some();
            if feminine {
                out.squad_label = Some(SQUAD_FEMININE.to_string());
            } else if Vocabulary::first_hit(&self.vocab.youth_squads, title).is_none() {
                // Senior men's team unless the title names a youth/reserve squad.
                out.squad_label = Some(SQUAD_MASCULINE.to_string());
            }
        }
        out
    }

    fn looks_like_football(&self, title: &str, comp_lower: &str) -> bool {
        Vocabulary::first_hit(&self.vocab.football_emoji, title).is_some()
            || Vocabulary::first_hit(&self.vocab.football_competitions, comp_lower).is_some()
    }
}
