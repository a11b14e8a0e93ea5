// src/series.rs
//! Day-over-day and period-over-period deltas from a daily close series.

use chrono::NaiveDate;

/// Roughly one trading month of daily bars.
pub const DEFAULT_LOOKBACK: usize = 22;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Unrounded deltas; rounding happens when a quote is packaged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SeriesDelta {
    pub price: f64,
    pub daily_change: f64,
    pub daily_change_percent: f64,
    pub period_change: f64,
    pub period_change_percent: f64,
}

/// Compute deltas for a series ordered oldest to newest.
///
/// Returns `None` only for an empty series. With fewer than
/// `lookback + 1` points the period change is measured against the
/// earliest point instead.
pub fn compute(series: &[PricePoint], lookback: usize) -> Option<SeriesDelta> {
    let (current, history) = series.split_last()?;
    let price = current.close;

    let Some(prev) = history.last() else {
        return Some(SeriesDelta {
            price,
            ..SeriesDelta::default()
        });
    };

    let daily_change = price - prev.close;
    let base = if series.len() > lookback {
        series[series.len() - 1 - lookback].close
    } else {
        series[0].close
    };
    let period_change = price - base;

    Some(SeriesDelta {
        price,
        daily_change,
        daily_change_percent: percent(daily_change, prev.close),
        period_change,
        period_change_percent: percent(period_change, base),
    })
}

/// `change / base * 100`, or zero when the base is zero.
pub fn percent(change: f64, base: f64) -> f64 {
    if base == 0.0 {
        0.0
    } else {
        change / base * 100.0
    }
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
