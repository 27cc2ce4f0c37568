use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// One entry of the `GET /api/v3/ticker/24hr` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    pub symbol: String,
    pub price_change: Decimal,
    pub price_change_percent: Decimal,
    pub weighted_avg_price: Decimal,
    pub prev_close_price: Decimal,
    pub last_price: Decimal,
    pub last_qty: Decimal,
    pub bid_price: Decimal,
    pub bid_qty: Decimal,
    pub ask_price: Decimal,
    pub ask_qty: Decimal,
    pub open_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    pub volume: Decimal,
    pub quote_volume: Decimal,
    pub open_time: i64,
    pub close_time: i64,
    /// `-1` when the window holds no trades.
    pub first_id: i64,
    pub last_id: i64,
    pub count: u64,
}

/// A gainer with its rank in the full descending sort and the instant the
/// snapshot was captured.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTicker {
    pub ticker: Ticker,
    pub position: u32,
    pub timestamp: DateTime<Utc>,
}

/// Column names of the snapshot log, in order.
pub const LOG_COLUMNS: [&str; 22] = [
    "symbol",
    "priceChange",
    "priceChangePercent",
    "weightedAvgPrice",
    "prevClosePrice",
    "lastPrice",
    "lastQty",
    "bidPrice",
    "bidQty",
    "askPrice",
    "askQty",
    "openPrice",
    "highPrice",
    "lowPrice",
    "volume",
    "quoteVolume",
    "openTime",
    "closeTime",
    "firstId",
    "lastId",
    "count",
    "position",
];

impl RankedTicker {
    /// Renders the record as a log row in [`LOG_COLUMNS`] order.
    pub fn to_row(&self) -> Vec<String> {
        let t = &self.ticker;
        vec![
            t.symbol.clone(),
            t.price_change.to_string(),
            t.price_change_percent.to_string(),
            t.weighted_avg_price.to_string(),
            t.prev_close_price.to_string(),
            t.last_price.to_string(),
            t.last_qty.to_string(),
            t.bid_price.to_string(),
            t.bid_qty.to_string(),
            t.ask_price.to_string(),
            t.ask_qty.to_string(),
            t.open_price.to_string(),
            t.high_price.to_string(),
            t.low_price.to_string(),
            t.volume.to_string(),
            t.quote_volume.to_string(),
            t.open_time.to_string(),
            t.close_time.to_string(),
            t.first_id.to_string(),
            t.last_id.to_string(),
            t.count.to_string(),
            self.position.to_string(),
        ]
    }
}
