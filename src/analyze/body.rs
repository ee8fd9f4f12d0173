// src/analyze/body.rs
//! Body (DESCRIPTION) header: competition, season and matchday from the first line.
//!
//! Producers format the header two ways, neither authoritative:
//! - piped:  "Campeonato Nacional Masculino | 25/26 - Jornada 4"
//! - spaced: "Segunda Liga 25/26 - Jornada 9", "CEV Challenge Cup 25/26"
//!
//! Each grammar is its own attempt, tried in that order; a line matching neither is
//! a plain competition label.

use crate::analyze::{non_empty, EventParser};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyHeader {
    pub competition: Option<String>,
    pub season: Option<String>,
    pub matchday: Option<u64>,
}

impl EventParser {
    /// Only the first line of `body` is inspected.
    pub fn parse_body_header(&self, body: &str) -> BodyHeader {
        let first_line = body.lines().next().unwrap_or_default().trim();
        if first_line.is_empty() {
            return BodyHeader::default();
        }

        self.parse_piped_header(first_line)
            .or_else(|| self.parse_spaced_header(first_line))
            .unwrap_or_else(|| BodyHeader {
                competition: Some(first_line.to_string()),
                ..BodyHeader::default()
            })
    }

    /// `<competition> | <season> [- ... Jornada <n> ...]`. `None` if the line has no `|`.
    fn parse_piped_header(&self, line: &str) -> Option<BodyHeader> {
        let (comp, rest) = line.split_once('|')?;
        let rest = rest.trim();

        let mut header = BodyHeader {
            competition: non_empty(comp),
            ..BodyHeader::default()
        };

        if let Some((season, tail)) = rest.split_once('-') {
            header.season = non_empty(season);
            header.matchday = self.find_matchday(tail);
        } else if self.patterns.season_only.is_match(rest) {
            header.season = Some(rest.to_string());
        }

        Some(header)
    }

    /// `<competition> <DD/DD|DDDD/DD> [- Jornada <n>]`, anchored at the end of the line.
    fn parse_spaced_header(&self, line: &str) -> Option<BodyHeader> {
        let caps = self.patterns.spaced_header.captures(line)?;
        Some(BodyHeader {
            competition: caps.name("comp").and_then(|m| non_empty(m.as_str())),
            season: caps.name("season").map(|m| m.as_str().to_string()),
            matchday: caps.name("j").and_then(|m| m.as_str().parse().ok()),
        })
    }

    fn find_matchday(&self, text: &str) -> Option<u64> {
        self.patterns
            .matchday
            .captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(body: &str) -> BodyHeader {
        EventParser::with_defaults().unwrap().parse_body_header(body)
    }

    fn h(comp: Option<&str>, season: Option<&str>, matchday: Option<u64>) -> BodyHeader {
        BodyHeader {
            competition: comp.map(str::to_string),
            season: season.map(str::to_string),
            matchday,
        }
    }

    #[test]
    fn piped_with_matchday() {
        assert_eq!(
            header("Campeonato Nacional Masculino | 25/26 - Jornada 4\nmais texto"),
            h(Some("Campeonato Nacional Masculino"), Some("25/26"), Some(4))
        );
    }

    #[test]
    fn piped_season_only_needs_season_shape() {
        assert_eq!(
            header("Liga Placard | 2025/26"),
            h(Some("Liga Placard"), Some("2025/26"), None)
        );
        assert_eq!(
            header("Liga Placard | Fase Final"),
            h(Some("Liga Placard"), None, None)
        );
    }

    #[test]
    fn piped_dash_without_jornada() {
        assert_eq!(
            header("Taça de Portugal | 25/26 - Oitavos de Final"),
            h(Some("Taça de Portugal"), Some("25/26"), None)
        );
    }

    #[test]
    fn large_matchday_numbers_are_kept() {
        assert_eq!(
            header("Liga | 25/26 - Jornada 99999999999"),
            h(Some("Liga"), Some("25/26"), Some(99_999_999_999))
        );
    }

    #[test]
    fn jornada_keyword_is_case_sensitive() {
        assert_eq!(
            header("Liga | 25/26 - jornada 3"),
            h(Some("Liga"), Some("25/26"), None)
        );
    }

    #[test]
    fn spaced_forms() {
        assert_eq!(
            header("CEV Challenge Cup 25/26"),
            h(Some("CEV Challenge Cup"), Some("25/26"), None)
        );
        assert_eq!(
            header("Segunda Liga 25/26 - Jornada 9"),
            h(Some("Segunda Liga"), Some("25/26"), Some(9))
        );
        assert_eq!(
            header("Liga dos Campeões 2025/26"),
            h(Some("Liga dos Campeões"), Some("2025/26"), None)
        );
    }

    #[test]
    fn plain_label_and_empty() {
        assert_eq!(
            header("  Campeonato Nacional Masculino  \nJornada 3"),
            h(Some("Campeonato Nacional Masculino"), None, None)
        );
        assert_eq!(header(""), BodyHeader::default());
        assert_eq!(header("\nLiga | 25/26"), BodyHeader::default());
    }

    #[test]
    fn only_first_line_is_read() {
        assert_eq!(
            header("Liga Revelação\nLiga Revelação | 25/26 - Jornada 7"),
            h(Some("Liga Revelação"), None, None)
        );
    }
}
