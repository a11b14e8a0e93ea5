// src/prices/nbp.rs
//! Official-rate provider: gold fixings (PLN/g) and the USD/PLN mid rate.

use serde::Deserialize;

use crate::config::PriceConfig;
use crate::error::FetchError;
use crate::ingest::http::{fetch_json, Transport};
use crate::series::{percent, SeriesDelta};

pub const GRAMS_PER_TROY_OUNCE: f64 = 31.1034768;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GoldFixing {
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "cena")]
    pub price_per_gram: f64,
}

#[derive(Debug, Deserialize)]
struct RateTable {
    rates: Vec<Rate>,
}

#[derive(Debug, Deserialize)]
struct Rate {
    mid: f64,
}

/// Day-over-day change per troy ounce from the last two fixings
/// (oldest first). No period change is available on this path.
pub fn gold_delta(fixings: &[GoldFixing]) -> Result<SeriesDelta, FetchError> {
    let [.., prev, current] = fixings else {
        return Err(FetchError::Empty);
    };
    let price = current.price_per_gram * GRAMS_PER_TROY_OUNCE;
    let prev_price = prev.price_per_gram * GRAMS_PER_TROY_OUNCE;
    let change = price - prev_price;
    Ok(SeriesDelta {
        price,
        daily_change: change,
        daily_change_percent: percent(change, prev_price),
        period_change: 0.0,
        period_change_percent: 0.0,
    })
}

pub async fn fetch_gold_fixings(
    transport: &dyn Transport,
    cfg: &PriceConfig,
) -> Result<Vec<GoldFixing>, FetchError> {
    fetch_json(transport, &cfg.nbp_gold_url).await
}

pub async fn fetch_usd_pln(transport: &dyn Transport, cfg: &PriceConfig) -> Result<f64, FetchError> {
    let table: RateTable = fetch_json(transport, &cfg.nbp_usd_url).await?;
    match table.rates.first() {
        Some(r) if r.mid.is_finite() && r.mid > 0.0 => Ok(r.mid),
        Some(r) => Err(FetchError::Parse(format!("implausible USD/PLN rate {}", r.mid))),
        None => Err(FetchError::Empty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::http::StubTransport;

    fn fixing(p: f64) -> GoldFixing {
        GoldFixing {
            date: "2025-10-13".into(),
            price_per_gram: p,
        }
    }

    #[test]
    fn converts_grams_to_ounces() {
        let d = gold_delta(&[fixing(400.0), fixing(404.0)]).unwrap();
        assert!((d.price - 404.0 * GRAMS_PER_TROY_OUNCE).abs() < 1e-9);
        assert!((d.daily_change - 4.0 * GRAMS_PER_TROY_OUNCE).abs() < 1e-9);
        assert!((d.daily_change_percent - 1.0).abs() < 1e-9);
        assert_eq!(d.period_change, 0.0);
    }

    #[test]
    fn needs_two_fixings() {
        assert!(matches!(gold_delta(&[fixing(400.0)]), Err(FetchError::Empty)));
        assert!(matches!(gold_delta(&[]), Err(FetchError::Empty)));
    }

    #[tokio::test]
    async fn usd_rate_rejects_non_positive() {
        let cfg = PriceConfig::default();
        let t = StubTransport::new().with_body(
            cfg.nbp_usd_url.clone(),
            r#"{"table":"A","currency":"dolar amerykański","code":"USD","rates":[{"no":"199/A/NBP/2025","effectiveDate":"2025-10-13","mid":0.0}]}"#,
        );
        assert!(matches!(fetch_usd_pln(&t, &cfg).await, Err(FetchError::Parse(_))));
    }

    #[tokio::test]
    async fn gold_fixings_decode_from_nbp_json() {
        let cfg = PriceConfig::default();
        let t = StubTransport::new().with_body(
            cfg.nbp_gold_url.clone(),
            r#"[{"data":"2025-10-10","cena":470.12},{"data":"2025-10-13","cena":475.5}]"#,
        );
        let f = fetch_gold_fixings(&t, &cfg).await.unwrap();
        assert_eq!(f.len(), 2);
        assert_eq!(f[1].price_per_gram, 475.5);
    }
}
