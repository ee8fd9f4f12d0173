// src/analyze/ticketing.rs
//! Ticket-sale notices vs. fixtures.
//!
//! Must run before title parsing: ticket titles usually carry a team pairing too
//! ("🎫 Bilhetes ⚽ SL Benfica x ..."), which would otherwise read as a match.

const SALE_CRITERIA: &str = "critérios de venda";
const TITLE_PREFIXES: [&str; 2] = ["🎫 bilhetes", "bilhetes "];
const TITLE_KEYWORD: &str = "bilhetes";
/// Separator used by regular fixture titles ("Team x Team | Sport ...").
const FIXTURE_SEPARATOR: &str = " | ";

/// Returns true for entries announcing ticket sales / sales criteria rather than a match.
/// `competition` is the parsed body header competition, if any.
pub fn classify_ticketing(title: &str, body: &str, competition: Option<&str>) -> bool {
    let t = title.trim().to_lowercase();
    let b = body.trim().to_lowercase();
    let c = competition.unwrap_or_default().trim().to_lowercase();

    // Strongest signal
    if b.contains(SALE_CRITERIA) || c.starts_with(SALE_CRITERIA) {
        return true;
    }

    if TITLE_PREFIXES.iter().any(|p| t.starts_with(p)) {
        return true;
    }

    // Talks about tickets but is not shaped like a fixture title.
    t.contains(TITLE_KEYWORD) && !t.contains(FIXTURE_SEPARATOR)
}
