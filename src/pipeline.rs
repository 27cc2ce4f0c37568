//! The per-tick job: check credentials, fetch and rank, append to the log.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::client::BinanceClient;
use crate::credentials::Credentials;
use crate::error::PersistError;
use crate::store::SnapshotLog;

/// Outcome of one successful tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub captured_at: DateTime<Utc>,
    pub gainers: usize,
    pub rows_appended: usize,
}

/// Fetcher and log writer composed into a single job.
///
/// Holds no state between ticks beyond the log file itself.
#[derive(Debug, Clone)]
pub struct Pipeline {
    client: BinanceClient,
    log: SnapshotLog,
}

impl Pipeline {
    pub fn new(client: BinanceClient, log: SnapshotLog) -> Self {
        Self { client, log }
    }

    pub fn log(&self) -> &SnapshotLog {
        &self.log
    }

    /// Runs one tick using credentials from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Self::run_tick_from`].
    pub async fn run_tick(&self) -> crate::Result<TickReport> {
        let credentials = Credentials::from_env()?;
        self.run_tick_with(&credentials).await
    }

    /// Runs one tick using credentials resolved through `lookup`.
    ///
    /// # Errors
    ///
    /// - [`GainersError::CredentialMissing`](crate::GainersError::CredentialMissing)
    ///   before any request is made.
    /// - [`GainersError::Fetch`](crate::GainersError::Fetch) before the log
    ///   is touched.
    /// - [`GainersError::Persist`](crate::GainersError::Persist) with the
    ///   previous log left in place.
    pub async fn run_tick_from<F>(&self, lookup: F) -> crate::Result<TickReport>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::from_lookup(lookup)?;
        self.run_tick_with(&credentials).await
    }

    /// Runs one tick with already validated credentials.
    pub async fn run_tick_with(&self, credentials: &Credentials) -> crate::Result<TickReport> {
        let captured_at = Utc::now();
        let snapshot = self
            .client
            .fetch_top_gainers(credentials.api_key(), Some(captured_at))
            .await?;
        let gainers = snapshot.len();
        debug!(gainers, %captured_at, "Ranked snapshot");

        let log = self.log.clone();
        let rows_appended = tokio::task::spawn_blocking(move || log.append_snapshot(&snapshot))
            .await
            .map_err(|e| PersistError::Io {
                path: self.log.path().to_path_buf(),
                source: std::io::Error::other(e),
            })??;

        Ok(TickReport {
            captured_at,
            gainers,
            rows_appended,
        })
    }
}
