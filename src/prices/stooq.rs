// src/prices/stooq.rs
//! Primary path: daily bars as CSV (`date,open,high,low,close,volume`, newest last).

use chrono::NaiveDate;

use crate::config::PriceConfig;
use crate::error::FetchError;
use crate::ingest::http::Transport;
use crate::series::PricePoint;

const CLOSE_COLUMN: usize = 4;

pub fn parse_daily_csv(body: &str) -> Result<Vec<PricePoint>, FetchError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.trim().as_bytes());

    let mut out = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let date = record
            .get(0)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .ok_or_else(|| FetchError::Parse(format!("bad date in row {:?}", record)))?;
        let close = record
            .get(CLOSE_COLUMN)
            .and_then(|c| c.parse::<f64>().ok())
            .filter(|c| c.is_finite())
            .ok_or_else(|| FetchError::Parse(format!("bad close in row {:?}", record)))?;
        out.push(PricePoint { date, close });
    }

    if out.is_empty() {
        return Err(FetchError::Empty);
    }
    Ok(out)
}

pub async fn fetch_history(
    transport: &dyn Transport,
    cfg: &PriceConfig,
    symbol: &str,
) -> Result<Vec<PricePoint>, FetchError> {
    let body = transport.get_text(&cfg.stooq_history_url(symbol)).await?;
    parse_daily_csv(&body)
}
