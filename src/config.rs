//! Application configuration loaded from environment variables.
//!
//! Every setting has a default, so an empty environment yields a working
//! configuration that polls Binance once a minute and appends to
//! `crypto_data.csv` in the working directory:
//! - `BINANCE_REST_URL` — REST base URL (default `https://api.binance.com`)
//! - `GAINERS_LOG_PATH` — snapshot log location
//! - `GAINERS_LOG_TIMESTAMP` — `true` to add a trailing `timestamp` column
//! - `GAINERS_POLL_INTERVAL_SECS` — seconds between ticks (default 60)
//! - `GAINERS_REQUEST_TIMEOUT_SECS` — per-request timeout (default 10)
//! - `GAINERS_CA_BUNDLE` — optional PEM file with extra trust roots
//!
//! API credentials are not part of the configuration; they are re-read from
//! the environment on every tick (see [`crate::credentials`]).

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::store::LogSchema;

/// Default public REST endpoint.
const DEFAULT_REST_URL: &str = "https://api.binance.com";

/// Default snapshot log location, relative to the working directory.
const DEFAULT_LOG_PATH: &str = "crypto_data.csv";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub binance: BinanceConfig,
    pub log: LogConfig,
    pub poll_interval: Duration,
}

/// Binance-specific configuration values.
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    pub rest_url: String,
    pub request_timeout: Duration,
    pub ca_bundle: Option<PathBuf>,
}

/// Snapshot log settings.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub path: PathBuf,
    pub schema: LogSchema,
}

/// Loads the application configuration from the process environment.
///
/// # Errors
///
/// Returns [`GainersError::Config`](crate::GainersError::Config) if a
/// variable is set to a value that cannot be parsed or is out of range.
pub fn fetch_config() -> crate::Result<AppConfig> {
    AppConfig::from_lookup(|name| std::env::var(name).ok())
}

impl AppConfig {
    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as absent.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|s| !s.is_empty());

        let rest_url = var("BINANCE_REST_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_REST_URL.to_string());

        let path = var("GAINERS_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH));

        let with_timestamp =
            parse_var::<bool>("GAINERS_LOG_TIMESTAMP", var("GAINERS_LOG_TIMESTAMP"))?;
        let schema = match with_timestamp {
            Some(true) => LogSchema::WithTimestamp,
            _ => LogSchema::Standard,
        };

        let poll_interval = positive_secs(
            "GAINERS_POLL_INTERVAL_SECS",
            var("GAINERS_POLL_INTERVAL_SECS"),
            DEFAULT_POLL_INTERVAL_SECS,
        )?;
        let request_timeout = positive_secs(
            "GAINERS_REQUEST_TIMEOUT_SECS",
            var("GAINERS_REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        Ok(AppConfig {
            binance: BinanceConfig {
                rest_url,
                request_timeout,
                ca_bundle: var("GAINERS_CA_BUNDLE").map(PathBuf::from),
            },
            log: LogConfig { path, schema },
            poll_interval,
        })
    }
}

fn parse_var<T>(name: &str, value: Option<String>) -> crate::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| {
                crate::GainersError::Config(format!("{name}={raw:?} is invalid: {e}"))
            })
        })
        .transpose()
}

fn positive_secs(name: &str, value: Option<String>, default: u64) -> crate::Result<Duration> {
    match parse_var::<u64>(name, value)? {
        Some(0) => Err(crate::GainersError::Config(format!(
            "{name} must be greater than zero"
        ))),
        Some(secs) => Ok(Duration::from_secs(secs)),
        None => Ok(Duration::from_secs(default)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> crate::Result<AppConfig> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn defaults_without_env_vars() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.binance.rest_url, DEFAULT_REST_URL);
        assert_eq!(config.binance.request_timeout, Duration::from_secs(10));
        assert!(config.binance.ca_bundle.is_none());
        assert_eq!(config.log.path, PathBuf::from("crypto_data.csv"));
        assert_eq!(config.log.schema, LogSchema::Standard);
        assert_eq!(config.poll_interval, Duration::from_secs(60));
    }

    #[test]
    fn overrides_from_env() {
        let config = config_from(&[
            ("BINANCE_REST_URL", "http://127.0.0.1:9000/"),
            ("GAINERS_LOG_PATH", "/var/lib/gainers/log.csv"),
            ("GAINERS_LOG_TIMESTAMP", "true"),
            ("GAINERS_POLL_INTERVAL_SECS", "300"),
            ("GAINERS_REQUEST_TIMEOUT_SECS", "3"),
            ("GAINERS_CA_BUNDLE", "/etc/ssl/extra.pem"),
        ])
        .unwrap();
        assert_eq!(config.binance.rest_url, "http://127.0.0.1:9000");
        assert_eq!(config.log.path, PathBuf::from("/var/lib/gainers/log.csv"));
        assert_eq!(config.log.schema, LogSchema::WithTimestamp);
        assert_eq!(config.poll_interval, Duration::from_secs(300));
        assert_eq!(config.binance.request_timeout, Duration::from_secs(3));
        assert_eq!(
            config.binance.ca_bundle.as_deref(),
            Some(std::path::Path::new("/etc/ssl/extra.pem"))
        );
    }

    #[test]
    fn empty_values_treated_as_absent() {
        let config = config_from(&[
            ("BINANCE_REST_URL", ""),
            ("GAINERS_LOG_PATH", ""),
            ("GAINERS_POLL_INTERVAL_SECS", ""),
        ])
        .unwrap();
        assert_eq!(config.binance.rest_url, DEFAULT_REST_URL);
        assert_eq!(config.log.path, PathBuf::from(DEFAULT_LOG_PATH));
        assert_eq!(config.poll_interval, Duration::from_secs(60));
    }

    #[test]
    fn rejects_zero_interval() {
        let err = config_from(&[("GAINERS_POLL_INTERVAL_SECS", "0")]).unwrap_err();
        assert!(err.to_string().contains("must be greater than zero"));
    }

    #[test]
    fn rejects_unparsable_timeout() {
        let err = config_from(&[("GAINERS_REQUEST_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("GAINERS_REQUEST_TIMEOUT_SECS"));
    }

    #[test]
    fn rejects_unparsable_timestamp_flag() {
        assert!(config_from(&[("GAINERS_LOG_TIMESTAMP", "yes")]).is_err());
    }
}
