// src/prices/yahoo.rs
//! Foreign-currency history: one month of daily closes from a chart API.

use chrono::DateTime;
use serde::Deserialize;

use crate::config::PriceConfig;
use crate::error::FetchError;
use crate::ingest::http::Transport;
use crate::series::PricePoint;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Pair timestamps with closes, skipping gaps (`null` closes).
pub fn parse_chart(body: &str) -> Result<Vec<PricePoint>, FetchError> {
    let resp: ChartResponse = serde_json::from_str(body)?;
    let result = resp
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.swap_remove(0)) })
        .ok_or(FetchError::Empty)?;
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let points: Vec<PricePoint> = result
        .timestamp
        .iter()
        .zip(closes)
        .filter_map(|(&ts, close)| {
            let close = close.filter(|c| c.is_finite())?;
            let date = DateTime::from_timestamp(ts, 0)?.date_naive();
            Some(PricePoint { date, close })
        })
        .collect();

    if points.is_empty() {
        return Err(FetchError::Empty);
    }
    Ok(points)
}

pub async fn fetch_silver_usd(
    transport: &dyn Transport,
    cfg: &PriceConfig,
) -> Result<Vec<PricePoint>, FetchError> {
    let body = transport.get_text(&cfg.silver_usd_url).await?;
    parse_chart(&body)
}
