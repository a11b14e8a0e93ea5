// src/digest.rs
//! One aggregation run: every news slot and instrument, in a fixed order.

use chrono::{DateTime, Local};
use futures::FutureExt;
use metrics::{counter, histogram};
use serde::Serialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::{info, warn};

use crate::config::DigestConfig;
use crate::ingest::http::Transport;
use crate::ingest::types::SourceDef;
use crate::ingest::{ensure_metrics_described, NewsItem, SourceFetcher};
use crate::prices::{InstrumentId, PricePipeline, PriceQuote};

/// Everything the renderer needs. Built once per run and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateResult {
    pub world_news: Vec<NewsItem>,
    pub regional_news: Vec<NewsItem>,
    pub finance_news: Vec<NewsItem>,
    pub instruments: BTreeMap<InstrumentId, PriceQuote>,
    pub generated_at: DateTime<Local>,
}

impl AggregateResult {
    pub fn instrument(&self, id: InstrumentId) -> Option<&PriceQuote> {
        self.instruments.get(&id)
    }

    /// True when every slot came back empty or as a placeholder.
    pub fn is_fully_degraded(&self) -> bool {
        self.world_news.is_empty()
            && self.regional_news.is_empty()
            && self.finance_news.is_empty()
            && self.instruments.values().all(|q| !q.is_available())
    }
}

pub struct Aggregator<'a> {
    cfg: &'a DigestConfig,
    transport: &'a dyn Transport,
}

impl<'a> Aggregator<'a> {
    pub fn new(cfg: &'a DigestConfig, transport: &'a dyn Transport) -> Self {
        Self { cfg, transport }
    }

    /// Steps run strictly one after another: world, regional, finance, gold,
    /// silver. A panicking step contributes its empty/placeholder value.
    pub async fn run(&self) -> AggregateResult {
        ensure_metrics_described();
        let t0 = std::time::Instant::now();

        let world_news = isolated("world_news", self.news(&self.cfg.world), Vec::new).await;
        let regional_news =
            isolated("regional_news", self.news(&self.cfg.regional), Vec::new).await;
        let finance_news = isolated("finance_news", self.news(&self.cfg.finance), Vec::new).await;

        let prices = PricePipeline::new(&self.cfg.prices, self.transport);
        let mut instruments = BTreeMap::new();
        for (id, display_name) in [(InstrumentId::Gold, "Gold"), (InstrumentId::Silver, "Silver")] {
            let quote = isolated(step_name(id), prices.quote(id), || {
                PriceQuote::fallback(display_name)
            })
            .await;
            instruments.insert(id, quote);
        }

        histogram!("digest_run_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        info!(
            target: "digest",
            world = world_news.len(),
            regional = regional_news.len(),
            finance = finance_news.len(),
            instruments_ok = instruments.values().filter(|q| q.is_available()).count(),
            "aggregation finished"
        );

        AggregateResult {
            world_news,
            regional_news,
            finance_news,
            instruments,
            generated_at: Local::now(),
        }
    }

    async fn news(&self, def: &SourceDef) -> Vec<NewsItem> {
        SourceFetcher::new(def, self.transport).fetch().await
    }
}

fn step_name(id: InstrumentId) -> &'static str {
    match id {
        InstrumentId::Gold => "gold",
        InstrumentId::Silver => "silver",
    }
}

/// Await `fut`, replacing a panic with `fallback()`.
pub async fn isolated<T, F, D>(step: &'static str, fut: F, fallback: D) -> T
where
    F: Future<Output = T>,
    D: FnOnce() -> T,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(v) => v,
        Err(panic) => {
            let msg = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            warn!(target: "digest", step, error = %msg, "step failed unexpectedly; using default");
            counter!("digest_step_panics_total").increment(1);
            fallback()
        }
    }
}
