//! Shared test utilities and constants.

#![allow(dead_code)]

use std::time::Duration;

use gainers::client::BinanceClient;
use gainers::config::BinanceConfig;

/// Binance spot REST endpoint.
pub const BINANCE_REST_URL: &str = "https://api.binance.com";

/// Builds a client with the default trust roots for `rest_url`.
pub fn test_client(rest_url: &str) -> BinanceClient {
    let config = BinanceConfig {
        rest_url: rest_url.to_string(),
        request_timeout: Duration::from_secs(10),
        ca_bundle: None,
    };
    let tls = gainers::tls::build_tls_config(None).expect("failed to build TLS config");
    BinanceClient::new(&config, tls).expect("failed to build client")
}

/// A 24h ticker entry with the given symbol and percentage change.
pub fn ticker_json(symbol: &str, pct: &str) -> serde_json::Value {
    serde_json::json!({
        "symbol": symbol,
        "priceChange": "0.00041000",
        "priceChangePercent": pct,
        "weightedAvgPrice": "0.05290134",
        "prevClosePrice": "0.05253000",
        "lastPrice": "0.05294000",
        "lastQty": "0.12350000",
        "bidPrice": "0.05293000",
        "bidQty": "17.41850000",
        "askPrice": "0.05294000",
        "askQty": "3.98270000",
        "openPrice": "0.05253000",
        "highPrice": "0.05321000",
        "lowPrice": "0.05239000",
        "volume": "31254.71920000",
        "quoteVolume": "1653.41528116",
        "openTime": 1_709_208_000_000_i64,
        "closeTime": 1_709_294_399_999_i64,
        "firstId": 441_021_873_i64,
        "lastId": 441_113_950_i64,
        "count": 92_078
    })
}

/// Variable lookup that returns both Binance credentials.
pub fn with_credentials(name: &str) -> Option<String> {
    match name {
        "BINANCE_API_KEY" => Some("test-key".to_string()),
        "BINANCE_API_SECRET" => Some("test-secret".to_string()),
        _ => None,
    }
}
