//! Ranking of a ticker snapshot into top gainers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{RankedTicker, Ticker};

/// Ranks tickers by 24h percentage change and keeps the gainers.
///
/// Tickers are stably sorted by `price_change_percent`, highest first, and
/// numbered from 1 across the whole sorted list. Only tickers with a
/// strictly positive change are returned; each keeps the position it held
/// in the full list. Every returned record carries `captured_at`.
pub fn rank_gainers(mut tickers: Vec<Ticker>, captured_at: DateTime<Utc>) -> Vec<RankedTicker> {
    // `sort_by` is stable, so equal percentages keep response order.
    tickers.sort_by(|a, b| b.price_change_percent.cmp(&a.price_change_percent));

    tickers
        .into_iter()
        .zip(1u32..)
        .filter(|(ticker, _)| ticker.price_change_percent > Decimal::ZERO)
        .map(|(ticker, position)| RankedTicker {
            ticker,
            position,
            timestamp: captured_at,
        })
        .collect()
}
