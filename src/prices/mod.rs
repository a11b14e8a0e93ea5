// src/prices/mod.rs
//! Gold and silver quotes. Each instrument walks its own ordered list of
//! data paths and stops at the first success; if every path fails the
//! placeholder quote is returned.

pub mod nbp;
pub mod quote;
pub mod stooq;
pub mod yahoo;

use metrics::counter;
use tracing::{info, warn};

use crate::config::PriceConfig;
use crate::error::FetchError;
use crate::ingest::http::Transport;
use crate::series::{self, PricePoint};

pub use quote::{InstrumentId, PriceQuote, QuoteLabel, QuoteStatus, Trend};
use quote::{GOLD, GOLD_NBP, SILVER};

pub struct PricePipeline<'a> {
    cfg: &'a PriceConfig,
    transport: &'a dyn Transport,
}

impl<'a> PricePipeline<'a> {
    pub fn new(cfg: &'a PriceConfig, transport: &'a dyn Transport) -> Self {
        Self { cfg, transport }
    }

    pub async fn quote(&self, id: InstrumentId) -> PriceQuote {
        match id {
            InstrumentId::Gold => self.gold().await,
            InstrumentId::Silver => self.silver().await,
        }
    }

    /// Stooq history, then the NBP fixings.
    pub async fn gold(&self) -> PriceQuote {
        match self.primary(&self.cfg.gold_symbol, &GOLD).await {
            Ok(q) => return q,
            Err(e) => path_failed(InstrumentId::Gold, "stooq", &e),
        }
        match self.gold_from_fixings().await {
            Ok(q) => {
                info!(target: "prices", instrument = "gold", path = "nbp", "quote ready");
                return q;
            }
            Err(e) => path_failed(InstrumentId::Gold, "nbp", &e),
        }
        unavailable(InstrumentId::Gold, GOLD.display_name)
    }

    /// Stooq history, then the USD history converted at the NBP mid rate.
    pub async fn silver(&self) -> PriceQuote {
        match self.primary(&self.cfg.silver_symbol, &SILVER).await {
            Ok(q) => return q,
            Err(e) => path_failed(InstrumentId::Silver, "stooq", &e),
        }
        match self.silver_from_usd().await {
            Ok(q) => {
                info!(target: "prices", instrument = "silver", path = "usd", "quote ready");
                return q;
            }
            Err(e) => path_failed(InstrumentId::Silver, "usd", &e),
        }
        unavailable(InstrumentId::Silver, SILVER.display_name)
    }

    async fn primary(&self, symbol: &str, label: &QuoteLabel) -> Result<PriceQuote, FetchError> {
        let history = stooq::fetch_history(self.transport, self.cfg, symbol).await?;
        let delta = series::compute(&history, self.cfg.lookback).ok_or(FetchError::Empty)?;
        info!(
            target: "prices",
            symbol,
            points = history.len(),
            price = delta.price,
            "quote ready"
        );
        Ok(PriceQuote::from_delta(label, delta))
    }

    async fn gold_from_fixings(&self) -> Result<PriceQuote, FetchError> {
        let fixings = nbp::fetch_gold_fixings(self.transport, self.cfg).await?;
        let delta = nbp::gold_delta(&fixings)?;
        Ok(PriceQuote::from_delta(&GOLD_NBP, delta))
    }

    async fn silver_from_usd(&self) -> Result<PriceQuote, FetchError> {
        let usd = yahoo::fetch_silver_usd(self.transport, self.cfg).await?;
        let rate = nbp::fetch_usd_pln(self.transport, self.cfg).await?;
        let pln: Vec<PricePoint> = usd
            .iter()
            .map(|p| PricePoint {
                date: p.date,
                close: p.close * rate,
            })
            .collect();
        let delta =
            series::compute(&pln, self.cfg.silver_usd_lookback).ok_or(FetchError::Empty)?;
        Ok(PriceQuote::from_delta(&SILVER, delta))
    }
}

fn path_failed(id: InstrumentId, path: &str, e: &FetchError) {
    warn!(target: "prices", instrument = %id, path, error = %e, "price path failed");
}

fn unavailable(id: InstrumentId, display_name: &str) -> PriceQuote {
    warn!(target: "prices", instrument = %id, "all price paths failed; using placeholder");
    counter!("digest_price_fallback_total").increment(1);
    PriceQuote::fallback(display_name)
}
