//! Binance REST market-data models and the ranked snapshot record.

pub mod ticker;

pub use ticker::{LOG_COLUMNS, RankedTicker, Ticker};
