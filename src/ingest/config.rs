// src/ingest/config.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const ENV_PATH: &str = "ECAL_FEEDS_PATH";

/// The club's public eCal subscription.
pub const DEFAULT_FEED_URL: &str =
    "https://ics.ecal.com/ecal-sub/6915f30f396fa00008c2a014/SL%20Benfica.ics";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedCfg {
    #[serde(default)]
    pub name: Option<String>,
    pub url: String,
}

/// A feed ready to fetch: blank names resolved to `feed_<index>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    pub name: String,
    pub url: String,
}

/// Load feeds from an explicit path. Supports TOML or JSON formats.
pub fn load_feeds_from(path: &Path) -> Result<Vec<Feed>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading feeds from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_feeds(&content, ext.as_str())
}

/// Load feeds using env var + fallbacks:
/// 1) $ECAL_FEEDS_PATH
/// 2) config/feeds.toml
/// 3) config/feeds.json
/// 4) the built-in club feed
pub fn load_feeds_default() -> Result<Vec<Feed>> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_feeds_from(&pb);
        } else {
            return Err(anyhow!("ECAL_FEEDS_PATH points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/feeds.toml");
    if toml_p.exists() {
        return load_feeds_from(&toml_p);
    }
    let json_p = PathBuf::from("config/feeds.json");
    if json_p.exists() {
        return load_feeds_from(&json_p);
    }
    Ok(clean_list(vec![FeedCfg {
        name: None,
        url: DEFAULT_FEED_URL.to_string(),
    }]))
}

fn parse_feeds(s: &str, hint_ext: &str) -> Result<Vec<Feed>> {
    // Try TOML first if hinted or content looks like toml.
    let try_toml = hint_ext == "toml" || s.contains("[[feeds]]");
    if try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    if let Ok(v) = parse_json(s) {
        return Ok(v);
    }
    if !try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported feeds format"))
}

fn parse_toml(s: &str) -> Result<Vec<Feed>> {
    #[derive(Deserialize)]
    struct TomlFeeds {
        feeds: Vec<FeedCfg>,
    }
    let v: TomlFeeds = toml::from_str(s)?;
    Ok(clean_list(v.feeds))
}

fn parse_json(s: &str) -> Result<Vec<Feed>> {
    let v: Vec<FeedCfg> = serde_json::from_str(s)?;
    Ok(clean_list(v))
}

/// Drop blank URLs and duplicates (first occurrence wins), then name unnamed feeds
/// by their position in the cleaned list.
fn clean_list(items: Vec<FeedCfg>) -> Vec<Feed> {
    let mut out: Vec<Feed> = Vec::with_capacity(items.len());
    for it in items {
        let url = it.url.trim();
        if url.is_empty() || out.iter().any(|f| f.url == url) {
            continue;
        }
        let name = it
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("feed_{}", out.len()));
        out.push(Feed {
            name,
            url: url.to_string(),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_trim_and_naming() {
        let toml = r#"
[[feeds]]
url = " https://a/x.ics "

[[feeds]]
name = "futsal"
url = "https://b/y.ics"

[[feeds]]
url = "https://a/x.ics"

[[feeds]]
url = ""
"#;
        let out = parse_toml(toml).unwrap();
        assert_eq!(
            out,
            vec![
                Feed {
                    name: "feed_0".into(),
                    url: "https://a/x.ics".into()
                },
                Feed {
                    name: "futsal".into(),
                    url: "https://b/y.ics".into()
                },
            ]
        );

        let json = r#"[{"url": "https://c/z.ics", "name": "  "}]"#;
        let out = parse_json(json).unwrap();
        assert_eq!(out[0].name, "feed_0");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_feeds("not a feed list", "txt").is_err());
    }
}
