//! eCal import — CLI entrypoint.
//! Fetches the configured feeds (or reads local .ics files), extracts structured
//! events and prints them as pretty JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ecal_events::ingest::{self, config::load_feeds_default, providers::EcalIcsProvider};
use ecal_events::{EventParser, EventRecord, EventType, FeedProvider};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "ecal-events", about = "Structured events from SL Benfica eCal feeds")]
struct Cli {
    /// Read these ICS files instead of fetching the configured feeds
    #[arg(short, long = "file")]
    files: Vec<PathBuf>,
    /// Max events to print
    #[arg(short = 'n', long, default_value = "50")]
    limit: usize,
    /// Only print events of this type
    #[arg(short = 't', long = "type", value_enum)]
    event_type: Option<TypeFilter>,
}

#[derive(Clone, Copy, ValueEnum)]
enum TypeFilter {
    Match,
    Ticketing,
    Other,
}

impl From<TypeFilter> for EventType {
    fn from(t: TypeFilter) -> Self {
        match t {
            TypeFilter::Match => EventType::Match,
            TypeFilter::Ticketing => EventType::Ticketing,
            TypeFilter::Other => EventType::Other,
        }
    }
}

/// Logs go to stderr so stdout stays plain JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ecal_events=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn build_providers(files: &[PathBuf]) -> Result<Vec<Box<dyn FeedProvider>>> {
    let mut providers: Vec<Box<dyn FeedProvider>> = Vec::new();
    if !files.is_empty() {
        for (idx, path) in files.iter().enumerate() {
            let ics = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            providers.push(Box::new(EcalIcsProvider::from_fixture_str(
                format!("feed_{idx}"),
                &ics,
            )));
        }
        return Ok(providers);
    }

    for feed in load_feeds_default()? {
        providers.push(Box::new(EcalIcsProvider::from_url(feed.name, feed.url)?));
    }
    Ok(providers)
}

fn print_event(record: &EventRecord) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev (ECAL_FEEDS_PATH, ECAL_VOCABULARY_PATH, RUST_LOG).
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    let parser = EventParser::from_config().context("loading vocabulary")?;
    let providers = build_providers(&cli.files)?;

    let records = ingest::run_import(&providers, &parser)
        .await
        .context("importing feeds")?;
    let wanted: Option<EventType> = cli.event_type.map(Into::into);

    let selected = records
        .iter()
        .filter(|r| wanted.map_or(true, |t| r.event_type == t))
        .take(cli.limit);
    for r in selected {
        print_event(r)?;
    }

    tracing::info!(target: "ecal::ingest", total = records.len(), "import finished");
    Ok(())
}
