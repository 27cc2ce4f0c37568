//! Binance top-gainer snapshot logger.
//!
//! On every tick the 24-hour ticker statistics are fetched over REST,
//! ranked by percentage change, and the gainers are appended, stamped with
//! one shared capture instant, to a CSV log.

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod ranking;
pub mod scheduler;
pub mod store;
pub mod tls;

pub use error::{GainersError, Result};
