//! Binance REST client for 24-hour ticker statistics.
//!
//! Only the public `GET /api/v3/ticker/24hr` endpoint is used. The API key
//! is attached as the `X-MBX-APIKEY` header; no request is signed.

use std::error::Error as _;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::BinanceConfig;
use crate::error::FetchError;
use crate::models::{RankedTicker, Ticker};
use crate::ranking::rank_gainers;

const TICKER_24H_PATH: &str = "/api/v3/ticker/24hr";
const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Longest error-response excerpt kept in [`FetchError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// HTTP client bound to one Binance REST endpoint.
#[derive(Debug, Clone)]
pub struct BinanceClient {
    http: reqwest::Client,
    rest_url: String,
    request_timeout: Duration,
}

impl BinanceClient {
    /// Builds a client that uses `tls_config` for HTTPS and aborts any
    /// request still pending after `config.request_timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`GainersError::Tls`](crate::GainersError::Tls) if the HTTP
    /// client cannot be constructed.
    pub fn new(config: &BinanceConfig, tls_config: rustls::ClientConfig) -> crate::Result<Self> {
        let http = reqwest::Client::builder()
            .use_preconfigured_tls(tls_config)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| crate::GainersError::Tls(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            rest_url: config.rest_url.clone(),
            request_timeout: config.request_timeout,
        })
    }

    /// Fetches 24-hour statistics for every symbol, in response order.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on timeout, transport failure, non-success
    /// status, or a body that is not an array of ticker records.
    pub async fn fetch_tickers(&self, api_key: &str) -> Result<Vec<Ticker>, FetchError> {
        let url = format!("{}{TICKER_24H_PATH}", self.rest_url);

        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let tickers: Vec<Ticker> = response.json().await.map_err(|e| self.classify(e))?;
        debug!(count = tickers.len(), "Fetched 24h ticker statistics");

        Ok(tickers)
    }

    /// Fetches the ticker snapshot and ranks its gainers.
    ///
    /// Every returned record is stamped with `captured_at`, or with the
    /// instant this call started when `None`.
    ///
    /// # Errors
    ///
    /// Propagates any [`FetchError`] from [`Self::fetch_tickers`].
    pub async fn fetch_top_gainers(
        &self,
        api_key: &str,
        captured_at: Option<DateTime<Utc>>,
    ) -> Result<Vec<RankedTicker>, FetchError> {
        let captured_at = captured_at.unwrap_or_else(Utc::now);
        let tickers = self.fetch_tickers(api_key).await?;
        Ok(rank_gainers(tickers, captured_at))
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.request_timeout)
        } else if e.is_decode() {
            match e.source() {
                Some(cause) => FetchError::Malformed(format!("{e}: {cause}")),
                None => FetchError::Malformed(e.to_string()),
            }
        } else {
            FetchError::Transport(e)
        }
    }
}
