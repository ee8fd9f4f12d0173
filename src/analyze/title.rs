// src/analyze/title.rs
//! Title (SUMMARY) parsing.
//!
//! Typical shape: `"⚽ SL Benfica x Paços Ferreira | Equipa B | 📺 BTV"`
//! - pairing segment:  the first `|`-segment containing `" x "`
//! - broadcast:        any later segment containing a broadcaster keyword
//! - modality segment: the first later segment that is not a broadcast
//!
//! Titles without a pairing (museum visits, announcements) are `Other`.

use crate::analyze::{non_empty, EventParser, Vocabulary};
use crate::record::EventType;

const PAIRING_SEPARATOR: &str = " x ";
const SEGMENT_SEPARATOR: char = '|';
const FOOTBALL: &str = "Futebol";

/// Everything the title alone can tell about an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleInfo {
    pub event_type: EventType,
    pub team_a: Option<String>,
    pub team_b: Option<String>,
    /// `Some` only when exactly one side passed the home-club prefix test.
    pub benfica_home: Option<bool>,
    pub opponent: Option<String>,
    pub sport: Option<String>,
    pub squad_label: Option<String>,
    pub broadcast: Option<String>,
}

impl TitleInfo {
    fn other() -> Self {
        Self {
            event_type: EventType::Other,
            team_a: None,
            team_b: None,
            benfica_home: None,
            opponent: None,
            sport: None,
            squad_label: None,
            broadcast: None,
        }
    }
}

impl EventParser {
    pub fn parse_title(&self, title: &str) -> TitleInfo {
        let title = title.trim();
        if title.is_empty() {
            return TitleInfo::other();
        }

        let segments: Vec<&str> = title
            .split(SEGMENT_SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        let Some(pairing_idx) = segments.iter().position(|s| s.contains(PAIRING_SEPARATOR))
        else {
            return TitleInfo::other();
        };

        let mut info = TitleInfo::other();
        info.event_type = EventType::Match;

        // Pairing: strip emoji in front, then split once.
        let pairing = self
            .patterns
            .leading_symbols
            .replace(segments[pairing_idx], "");
        if let Some((a, b)) = pairing.trim().split_once(PAIRING_SEPARATOR) {
            let team_a = self.squash_whitespace(a);
            let team_b = self.squash_whitespace(b);
            let (home, opponent) = self.resolve_home(&team_a, &team_b);
            info.benfica_home = home;
            info.opponent = opponent;
            info.team_a = non_empty(&team_a);
            info.team_b = non_empty(&team_b);
        }

        // Metadata after the pairing.
        let mut modality: Option<&str> = None;
        for &seg in &segments[pairing_idx + 1..] {
            if Vocabulary::first_hit(&self.vocab.broadcasters, seg).is_some() {
                info.broadcast = Some(seg.to_string());
                continue;
            }
            if modality.is_none() {
                modality = Some(seg);
            }
        }

        if let Some(seg) = modality {
            let (sport, squad) = self.resolve_modality(seg);
            info.sport = sport;
            info.squad_label = squad;
        }

        info
    }

    /// Home-club prefix test (handles suffixed squads like "SL Benfica B").
    pub fn is_home_team(&self, name: &str) -> bool {
        !name.is_empty() && name.starts_with(self.vocab.home_club.as_str())
    }

    /// Returns `(benfica_home, opponent)`.
    fn resolve_home(&self, team_a: &str, team_b: &str) -> (Option<bool>, Option<String>) {
        match (self.is_home_team(team_a), self.is_home_team(team_b)) {
            (true, false) => (Some(true), non_empty(team_b)),
            (false, true) => (Some(false), non_empty(team_a)),
            // Derby between two home squads, or no home squad at all: best-effort guess.
            _ => (None, non_empty(team_b).or_else(|| non_empty(team_a))),
        }
    }

    /// Returns `(sport, squad_label)` for the modality segment.
    fn resolve_modality(&self, seg: &str) -> (Option<String>, Option<String>) {
        if let Some(sport) = Vocabulary::first_hit(&self.vocab.sports, seg) {
            // "Andebol Feminino" -> squad "Feminino"
            let squad = seg
                .split_once(sport)
                .and_then(|(_, after)| non_empty(after));
            return (Some(sport.to_string()), squad);
        }
        if Vocabulary::first_hit(&self.vocab.football_squads, seg).is_some() {
            return (Some(FOOTBALL.to_string()), Some(seg.to_string()));
        }
        (None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> EventParser {
        EventParser::with_defaults().unwrap()
    }

    #[test]
    fn fixture_with_squad_and_broadcast() {
        let t = parser().parse_title("⚽ SL Benfica x Paços Ferreira | Equipa B | 📺 BTV");
        assert_eq!(t.event_type, EventType::Match);
        assert_eq!(t.team_a.as_deref(), Some("SL Benfica"));
        assert_eq!(t.team_b.as_deref(), Some("Paços Ferreira"));
        assert_eq!(t.benfica_home, Some(true));
        assert_eq!(t.opponent.as_deref(), Some("Paços Ferreira"));
        assert_eq!(t.sport.as_deref(), Some("Futebol"));
        assert_eq!(t.squad_label.as_deref(), Some("Equipa B"));
        assert_eq!(t.broadcast.as_deref(), Some("📺 BTV"));
    }

    #[test]
    fn away_fixture_with_sport_and_gender() {
        let t = parser().parse_title("🤾👩 CA Leça x SL Benfica | Andebol Feminino");
        assert_eq!(t.team_a.as_deref(), Some("CA Leça"));
        assert_eq!(t.benfica_home, Some(false));
        assert_eq!(t.opponent.as_deref(), Some("CA Leça"));
        assert_eq!(t.sport.as_deref(), Some("Andebol"));
        assert_eq!(t.squad_label.as_deref(), Some("Feminino"));
        assert!(t.broadcast.is_none());
    }

    #[test]
    fn sport_without_squad_leaves_label_absent() {
        let t = parser().parse_title("🏐 SL Benfica x Sporting CP | Voleibol");
        assert_eq!(t.sport.as_deref(), Some("Voleibol"));
        assert_eq!(t.squad_label, None);
    }

    #[test]
    fn keyword_order_decides_precedence() {
        let t = parser().parse_title("SL Benfica x OC Barcelos | Hóquei em Patins Masculino");
        assert_eq!(t.sport.as_deref(), Some("Hóquei em Patins"));
        assert_eq!(t.squad_label.as_deref(), Some("Masculino"));
    }

    #[test]
    fn broadcast_first_then_modality() {
        let t = parser().parse_title("SL Benfica x FC Porto | 📺 Sport TV | Futsal Masculino");
        assert_eq!(t.broadcast.as_deref(), Some("📺 Sport TV"));
        assert_eq!(t.sport.as_deref(), Some("Futsal"));
        assert_eq!(t.squad_label.as_deref(), Some("Masculino"));
    }

    #[test]
    fn only_first_modality_segment_counts() {
        let t = parser().parse_title("SL Benfica x Braga | Taça | Basquetebol");
        assert_eq!(t.sport, None);
        assert_eq!(t.squad_label, None);
    }

    #[test]
    fn derby_between_home_squads_is_ambiguous() {
        let t = parser().parse_title("SL Benfica B x SL Benfica | Futebol");
        assert_eq!(t.benfica_home, None);
        assert_eq!(t.opponent.as_deref(), Some("SL Benfica"));
    }

    #[test]
    fn neutral_pairing_guesses_team_b() {
        let t = parser().parse_title("FC Porto x Sporting CP");
        assert_eq!(t.event_type, EventType::Match);
        assert_eq!(t.benfica_home, None);
        assert_eq!(t.opponent.as_deref(), Some("Sporting CP"));
    }

    #[test]
    fn whitespace_in_team_names_is_collapsed() {
        let t = parser().parse_title("⚽️  SL   Benfica x  Gil\tVicente |Futebol");
        assert_eq!(t.team_a.as_deref(), Some("SL Benfica"));
        assert_eq!(t.team_b.as_deref(), Some("Gil Vicente"));
        assert_eq!(t.benfica_home, Some(true));
    }

    #[test]
    fn no_pairing_is_other() {
        let t = parser().parse_title("Visita ao Museu Benfica");
        assert_eq!(t, TitleInfo::other());
        assert_eq!(parser().parse_title("   "), TitleInfo::other());
    }
}
