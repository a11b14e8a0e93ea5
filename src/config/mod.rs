// src/config/mod.rs
//! Immutable run configuration: feed definitions, price endpoints, HTTP knobs.
//!
//! Built once in `main` and passed by reference everywhere else.

pub mod mail;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ingest::types::{FeedEndpoint, SourceDef};
use crate::series::DEFAULT_LOOKBACK;
use crate::text::SUMMARY_LIMIT;

pub use mail::MailConfig;

pub const ENV_CONFIG_PATH: &str = "DIGEST_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/digest.toml";

const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DigestConfig {
    pub http: HttpConfig,
    pub world: SourceDef,
    pub regional: SourceDef,
    pub finance: SourceDef,
    pub prices: PriceConfig,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            world: SourceDef::new(
                "World",
                vec![
                    FeedEndpoint::new("http://feeds.bbci.co.uk/news/rss.xml", "BBC News"),
                    FeedEndpoint::new("http://feeds.bbci.co.uk/news/world/rss.xml", "BBC World"),
                ],
            )
            .with_summary_limit(SUMMARY_LIMIT),
            regional: SourceDef::new(
                "Poland",
                vec![FeedEndpoint::new(
                    "http://rss.gazeta.pl/pub/rss/gazetawyborcza_kraj.xml",
                    "Gazeta Wyborcza - Kraj",
                )],
            )
            .with_clean_markup(true)
            .with_summary_limit(SUMMARY_LIMIT),
            finance: SourceDef::new(
                "Bankier.pl",
                vec![FeedEndpoint::new(
                    "https://www.bankier.pl/rss/wiadomosci.xml",
                    "Bankier.pl",
                )],
            )
            .with_clean_markup(true)
            .with_summary_limit(SUMMARY_LIMIT),
            prices: PriceConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: BROWSER_UA.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PriceConfig {
    /// Daily-bar CSV endpoint; `?s=<symbol>&i=d` is appended.
    pub stooq_url: String,
    pub gold_symbol: String,
    pub silver_symbol: String,
    /// Last two official gold fixings, PLN per gram.
    pub nbp_gold_url: String,
    /// Current USD/PLN mid rate.
    pub nbp_usd_url: String,
    /// One month of daily XAG/USD closes.
    pub silver_usd_url: String,
    pub lookback: usize,
    pub silver_usd_lookback: usize,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            stooq_url: "https://stooq.pl/q/d/l/".to_string(),
            gold_symbol: "xaupln".to_string(),
            silver_symbol: "xagpln".to_string(),
            nbp_gold_url: "http://api.nbp.pl/api/cenyzlota/last/2/?format=json".to_string(),
            nbp_usd_url: "http://api.nbp.pl/api/exchangerates/rates/a/usd/?format=json"
                .to_string(),
            silver_usd_url:
                "https://query1.finance.yahoo.com/v8/finance/chart/XAGUSD=X?range=1mo&interval=1d"
                    .to_string(),
            lookback: DEFAULT_LOOKBACK,
            silver_usd_lookback: 20,
        }
    }
}

impl PriceConfig {
    pub fn stooq_history_url(&self, symbol: &str) -> String {
        format!("{}?s={}&i=d", self.stooq_url, symbol)
    }
}

impl DigestConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing digest config toml")
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading digest config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Resolve configuration:
    /// 1) $DIGEST_CONFIG_PATH
    /// 2) config/digest.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            return Self::load_from(&pb);
        }
        let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_p.exists() {
            return Self::load_from(&default_p);
        }
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_slot() {
        let cfg = DigestConfig::default();
        assert_eq!(cfg.world.endpoints.len(), 2);
        assert!(!cfg.world.clean_markup);
        assert!(cfg.regional.clean_markup && cfg.finance.clean_markup);
        assert_eq!(cfg.finance.summary_limit, Some(SUMMARY_LIMIT));
        assert_eq!(cfg.prices.lookback, 22);
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let cfg = DigestConfig::from_toml_str(
            r#"
[http]
timeout_secs = 5

[finance]
name = "Markets"
endpoints = [{ url = "http://localhost/finance.xml", name = "Local" }]
"#,
        )
        .unwrap();
        assert_eq!(cfg.http.timeout_secs, 5);
        assert!(cfg.http.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(cfg.finance.name, "Markets");
        // A written slot table replaces the built-in slot; unset knobs are off.
        assert!(!cfg.finance.clean_markup);
        assert_eq!(cfg.finance.summary_limit, None);
        assert_eq!(cfg.world, DigestConfig::default().world);
    }

    #[test]
    fn item_limits_are_not_configurable() {
        let cfg = DigestConfig::from_toml_str(
            r#"
[world]
name = "World"
cap = 10
over_fetch = 50
endpoints = [{ url = "http://localhost/w.xml", name = "W" }]
"#,
        )
        .unwrap();
        assert_eq!(cfg.world.name, "World");
        assert_eq!(cfg.world.endpoints.len(), 1);
    }

    #[test]
    fn stooq_url_carries_symbol() {
        let p = PriceConfig::default();
        assert_eq!(
            p.stooq_history_url("xaupln"),
            "https://stooq.pl/q/d/l/?s=xaupln&i=d"
        );
    }
}
