// src/prices/quote.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::series::{round2, SeriesDelta};

pub const UNAVAILABLE_REASON: &str = "Data temporarily unavailable";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentId {
    Gold,
    Silver,
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstrumentId::Gold => f.write_str("gold"),
            InstrumentId::Silver => f.write_str("silver"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "lowercase")]
pub enum QuoteStatus {
    Ok,
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Unknown,
}

/// Display labels of one data path.
#[derive(Debug, Clone, Copy)]
pub struct QuoteLabel {
    pub symbol: &'static str,
    pub display_name: &'static str,
    pub currency: &'static str,
    pub unit: &'static str,
}

pub const GOLD: QuoteLabel = QuoteLabel {
    symbol: "XAU/PLN",
    display_name: "Gold",
    currency: "PLN",
    unit: "oz",
};

pub const GOLD_NBP: QuoteLabel = QuoteLabel {
    display_name: "Gold (NBP)",
    ..GOLD
};

pub const SILVER: QuoteLabel = QuoteLabel {
    symbol: "XAG/PLN",
    display_name: "Silver",
    currency: "PLN",
    unit: "oz",
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub symbol: String,
    pub display_name: String,
    pub price: f64,
    pub currency: String,
    pub unit: String,
    pub daily_change: f64,
    pub daily_change_percent: f64,
    pub period_change: f64,
    pub period_change_percent: f64,
    pub status: QuoteStatus,
}

impl PriceQuote {
    /// Package one path's deltas, rounded to two decimals.
    pub fn from_delta(label: &QuoteLabel, d: SeriesDelta) -> Self {
        Self {
            symbol: label.symbol.to_string(),
            display_name: label.display_name.to_string(),
            price: round2(d.price),
            currency: label.currency.to_string(),
            unit: label.unit.to_string(),
            daily_change: round2(d.daily_change),
            daily_change_percent: round2(d.daily_change_percent),
            period_change: round2(d.period_change),
            period_change_percent: round2(d.period_change_percent),
            status: QuoteStatus::Ok,
        }
    }

    /// Placeholder for an instrument no path could price. Numbers are zero
    /// and meant for display only.
    pub fn fallback(display_name: &str) -> Self {
        Self {
            symbol: "---".to_string(),
            display_name: display_name.to_string(),
            price: 0.0,
            currency: "-".to_string(),
            unit: "-".to_string(),
            daily_change: 0.0,
            daily_change_percent: 0.0,
            period_change: 0.0,
            period_change_percent: 0.0,
            status: QuoteStatus::Unavailable(UNAVAILABLE_REASON.to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == QuoteStatus::Ok
    }

    pub fn trend(&self) -> Trend {
        if !self.is_available() {
            Trend::Unknown
        } else if self.daily_change > 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_all_zero_and_unavailable() {
        let q = PriceQuote::fallback("Gold");
        assert!(!q.is_available());
        assert_eq!(q.status, QuoteStatus::Unavailable(UNAVAILABLE_REASON.into()));
        for v in [
            q.price,
            q.daily_change,
            q.daily_change_percent,
            q.period_change,
            q.period_change_percent,
        ] {
            assert_eq!(v, 0.0);
        }
        assert_eq!(q.trend(), Trend::Unknown);
    }

    #[test]
    fn from_delta_rounds_every_field() {
        let q = PriceQuote::from_delta(
            &SILVER,
            SeriesDelta {
                price: 123.456,
                daily_change: -0.004,
                daily_change_percent: -0.0032,
                period_change: 10.0049,
                period_change_percent: 8.888_8,
            },
        );
        assert_eq!(q.price, 123.46);
        assert_eq!(q.daily_change, -0.0);
        assert_eq!(q.period_change, 10.0);
        assert_eq!(q.period_change_percent, 8.89);
        assert_eq!(q.symbol, "XAG/PLN");
        // flat after rounding is not a rise
        assert_eq!(q.trend(), Trend::Down);
    }

    #[test]
    fn trend_up_only_on_a_strict_rise() {
        let mut q = PriceQuote::from_delta(&GOLD, SeriesDelta::default());
        assert_eq!(q.trend(), Trend::Down);
        q.daily_change = 0.01;
        assert_eq!(q.trend(), Trend::Up);
    }

    #[test]
    fn gold_nbp_label_shares_symbol() {
        assert_eq!(GOLD_NBP.symbol, GOLD.symbol);
        assert_eq!(GOLD_NBP.display_name, "Gold (NBP)");
    }
}
