use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use std::time::Duration;

use crate::ingest::ics::{decode_calendar, DEFAULT_TIMEZONE};
use crate::ingest::types::{FeedProvider, RawEntry};

const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// An eCal ICS subscription, either fetched over HTTP or read from an in-memory copy.
pub struct EcalIcsProvider {
    name: String,
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl EcalIcsProvider {
    /// Provider over ICS text already in memory (files, tests).
    pub fn from_fixture_str(name: impl Into<String>, ics: &str) -> Self {
        Self {
            name: name.into(),
            mode: Mode::Fixture(ics.to_string()),
        }
    }

    pub fn from_url(name: impl Into<String>, url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("building http client")?;
        Ok(Self {
            name: name.into(),
            mode: Mode::Http {
                url: url.into(),
                client,
            },
        })
    }

    fn decode(&self, ics: &str) -> Result<Vec<RawEntry>> {
        let t0 = std::time::Instant::now();
        let entries = decode_calendar(ics, &self.name, DEFAULT_TIMEZONE)?;

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("ecal_decode_ms").record(ms);
        counter!("ecal_entries_total").increment(entries.len() as u64);
        Ok(entries)
    }
}

#[async_trait]
impl FeedProvider for EcalIcsProvider {
    async fn fetch_entries(&self) -> Result<Vec<RawEntry>> {
        match &self.mode {
            Mode::Fixture(s) => self.decode(s),
            Mode::Http { url, client } => {
                tracing::info!(target: "ecal::ingest", feed = %self.name, %url, "fetching feed");
                let resp = client
                    .get(url.as_str())
                    .send()
                    .await
                    .with_context(|| format!("{} http get()", self.name))?
                    .error_for_status()
                    .with_context(|| format!("{} http status", self.name))?;
                let body = resp
                    .text()
                    .await
                    .with_context(|| format!("{} http .text()", self.name))?;
                self.decode(&body)
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
