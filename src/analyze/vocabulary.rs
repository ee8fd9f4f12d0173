// src/analyze/vocabulary.rs
//! Keyword vocabulary driving the classifiers (loaded from `config/vocabulary.toml`).
//!
//! Every list is ordered: the first keyword found in a segment wins, so list order is
//! the precedence when a text could match several keywords (e.g. "Hóquei em Patins"
//! must come before "Hóquei").
//!
//! Resolution order:
//! 1) `$ECAL_VOCABULARY_PATH` (must point to an existing file)
//! 2) `config/vocabulary.toml`
//! 3) built-in defaults (`Vocabulary::default()`)

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_VOCABULARY_PATH: &str = "config/vocabulary.toml";
pub const ENV_VOCABULARY_PATH: &str = "ECAL_VOCABULARY_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Display name of the home club; team names starting with it are "ours".
    pub home_club: String,
    pub sports: Vec<String>,
    pub football_squads: Vec<String>,
    /// Lower-case phrases; matched against the lower-cased competition.
    pub football_competitions: Vec<String>,
    pub broadcasters: Vec<String>,
    /// Lower-case phrases; matched against lower-cased competition and title.
    pub feminine: Vec<String>,
    /// Youth/reserve squad labels the title parser is expected to capture.
    pub youth_squads: Vec<String>,
    pub football_emoji: Vec<String>,
}

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            home_club: "SL Benfica".to_string(),
            sports: list(&[
                "Hóquei em Patins",
                "Andebol",
                "Futsal",
                "Basquetebol",
                "Voleibol",
                "Futebol",
                "Hóquei",
            ]),
            football_squads: list(&[
                "Equipa B",
                "Juniores",
                "Sub-19",
                "Sub-23",
                "Sub-17",
                "Sub-15",
                "Juvenis",
                "Iniciados",
            ]),
            football_competitions: list(&[
                "liga portugal",
                "taça de portugal",
                "liga dos campeões",
                "liga dos campeoes",
                "liga revelação",
                "liga revelacao",
                "liga dos campeões feminina",
                "liga dos campeoes feminina",
                "liga dos campeões feminina uefa",
                "supertaça",
                "supertaca",
                "campeonato nacional feminino ii divisão",
                "campeonato nacional feminino ii divisao",
            ]),
            broadcasters: list(&[
                "📺",
                "BTV",
                "DAZN",
                "Sport TV",
                "Eleven",
                "Canal 11",
                "RTP",
                "SIC",
                "TVI",
                "Benfica TV",
            ]),
            feminine: list(&["feminina", "feminino"]),
            youth_squads: list(&["Sub-23", "Sub 23", "Sub-19", "Sub 19", "Juniores", "Equipa B"]),
            football_emoji: list(&["⚽"]),
        }
    }
}

impl Vocabulary {
    /// Resolve the vocabulary via env path, default path, then built-in defaults.
    pub fn load() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_VOCABULARY_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!(
                    "{ENV_VOCABULARY_PATH} points to non-existent path {}",
                    pb.display()
                ));
            }
            return Self::from_path(&pb);
        }
        let default_p = PathBuf::from(DEFAULT_VOCABULARY_PATH);
        if default_p.exists() {
            return Self::from_path(&default_p);
        }
        tracing::debug!(target: "ecal::config", "no vocabulary file, using built-in defaults");
        Ok(Self::default())
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading vocabulary from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing vocabulary {}", path.display()))
    }

    /// Parse from TOML. Missing tables/keys fall back to the built-in defaults.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let vocab: Vocabulary = toml::from_str(toml_str)?;
        vocab.validate()?;
        Ok(vocab)
    }

    /// Lower-case the lists that are matched against lower-cased text
    /// (`football_competitions`, `feminine`).
    pub fn normalized(mut self) -> Self {
        for list in [&mut self.football_competitions, &mut self.feminine] {
            for k in list.iter_mut() {
                *k = k.to_lowercase();
            }
        }
        self
    }

    /// Reject configurations the classifiers cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.home_club.trim().is_empty() {
            bail!("vocabulary: `home_club` must not be empty");
        }
        if self.sports.is_empty() {
            bail!("vocabulary: `sports` must list at least one sport");
        }
        let lists: [(&str, &[String]); 7] = [
            ("sports", self.sports.as_slice()),
            ("football_squads", self.football_squads.as_slice()),
            ("football_competitions", self.football_competitions.as_slice()),
            ("broadcasters", self.broadcasters.as_slice()),
            ("feminine", self.feminine.as_slice()),
            ("youth_squads", self.youth_squads.as_slice()),
            ("football_emoji", self.football_emoji.as_slice()),
        ];
        for (name, items) in lists {
            if let Some(i) = items.iter().position(|k| k.trim().is_empty()) {
                bail!("vocabulary: `{name}` has a blank keyword at index {i}");
            }
        }
        Ok(())
    }

    /// First keyword of `keywords` contained in `text` (ordered, first hit wins).
    pub(crate) fn first_hit<'a>(keywords: &'a [String], text: &str) -> Option<&'a str> {
        keywords
            .iter()
            .map(String::as_str)
            .find(|k| text.contains(k))
    }
}
