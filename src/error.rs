//! Crate-level error types.
//!
//! [`GainersError`] unifies every error source (configuration, credentials,
//! the ticker fetch, the snapshot log) behind a single enum so callers can
//! match on the variant they care about while still using the `?` operator
//! for easy propagation. Fetch and persistence failures carry their own
//! enums ([`FetchError`], [`PersistError`]) so the tick boundary can report
//! which stage failed.

use std::path::PathBuf;
use std::time::Duration;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GainersError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum GainersError {
    /// A configuration value could not be parsed or is out of range.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required exchange credential is absent from the environment.
    #[error("credential missing: {0} is not set")]
    CredentialMissing(&'static str),

    /// The ticker snapshot could not be fetched or decoded.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The snapshot log could not be read or rewritten.
    #[error("persist failed: {0}")]
    Persist(#[from] PersistError),

    /// The TLS trust store could not be built.
    #[error("tls error: {0}")]
    Tls(String),
}

/// Coarse failure category reported at the tick boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Config,
    CredentialMissing,
    FetchFailure,
    PersistFailure,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::CredentialMissing => "credential_missing",
            Self::FetchFailure => "fetch_failure",
            Self::PersistFailure => "persist_failure",
        }
    }
}

impl GainersError {
    /// Returns the failure category of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Config(_) | Self::Tls(_) => FailureKind::Config,
            Self::CredentialMissing(_) => FailureKind::CredentialMissing,
            Self::Fetch(_) => FailureKind::FetchFailure,
            Self::Persist(_) => FailureKind::PersistFailure,
        }
    }
}

/// Reasons a ticker fetch produced no snapshot.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection, TLS, or other transport-level failure.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The exchange answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body is not an array of ticker records.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Reasons the snapshot log could not be updated.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// Filesystem operation on the log or its temporary file failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The existing log could not be parsed, or a row could not be written.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The existing log's header differs from the configured column set.
    #[error("{}: header {found:?} does not match expected columns", .path.display())]
    SchemaMismatch { path: PathBuf, found: Vec<String> },
}
