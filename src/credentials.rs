//! Binance API credentials.
//!
//! Both the key and the secret must be present for a tick to run, even
//! though only the key is sent with the public ticker request. Values are
//! read fresh on every tick so rotating a credential does not require a
//! restart, and are kept in [`Zeroizing`] buffers.

use std::fmt;

use tracing::debug;
use zeroize::Zeroizing;

/// Known API credential keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialKey {
    BinanceApiKey,
    BinanceApiSecret,
}

impl CredentialKey {
    /// Returns the environment variable name for this credential.
    pub fn env_var(self) -> &'static str {
        match self {
            Self::BinanceApiKey => "BINANCE_API_KEY",
            Self::BinanceApiSecret => "BINANCE_API_SECRET",
        }
    }
}

/// A validated key/secret pair.
pub struct Credentials {
    api_key: Zeroizing<String>,
    api_secret: Zeroizing<String>,
}

impl Credentials {
    /// Reads both credentials from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`GainersError::CredentialMissing`](crate::GainersError::CredentialMissing)
    /// naming the first variable that is unset or empty.
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads both credentials through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let load = |key: CredentialKey| {
            lookup(key.env_var())
                .filter(|s| !s.is_empty())
                .map(Zeroizing::new)
                .ok_or(crate::GainersError::CredentialMissing(key.env_var()))
        };

        let api_key = load(CredentialKey::BinanceApiKey)?;
        let api_secret = load(CredentialKey::BinanceApiSecret)?;

        Ok(Self {
            api_key,
            api_secret,
        })
    }

    /// Builds credentials directly, bypassing the presence check.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: Zeroizing::new(api_key.into()),
            api_secret: Zeroizing::new(api_secret.into()),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Loads a `.env` file from the working directory into the process
/// environment, if one exists. Variables already set are not overridden.
///
/// Call this at startup before [`crate::config::fetch_config`].
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded environment file"),
        Err(e) => debug!(error = %e, "no environment file loaded"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::GainersError;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| env.get(name).cloned()
    }

    #[test]
    fn loads_both_credentials() {
        let creds = Credentials::from_lookup(lookup(&[
            ("BINANCE_API_KEY", "test-key"),
            ("BINANCE_API_SECRET", "test-secret"),
        ]))
        .unwrap();
        assert_eq!(creds.api_key(), "test-key");
        assert_eq!(creds.api_secret(), "test-secret");
    }

    #[test]
    fn rejects_key_without_secret() {
        let err =
            Credentials::from_lookup(lookup(&[("BINANCE_API_KEY", "key-only")])).unwrap_err();
        assert!(matches!(
            err,
            GainersError::CredentialMissing("BINANCE_API_SECRET")
        ));
    }

    #[test]
    fn rejects_secret_without_key() {
        let err = Credentials::from_lookup(lookup(&[("BINANCE_API_SECRET", "secret-only")]))
            .unwrap_err();
        assert!(matches!(err, GainersError::CredentialMissing("BINANCE_API_KEY")));
    }

    #[test]
    fn empty_values_treated_as_absent() {
        let err = Credentials::from_lookup(lookup(&[
            ("BINANCE_API_KEY", ""),
            ("BINANCE_API_SECRET", "secret"),
        ]))
        .unwrap_err();
        assert!(matches!(err, GainersError::CredentialMissing("BINANCE_API_KEY")));
    }

    #[test]
    fn from_env_reads_the_process_environment() {
        let from_env = Credentials::from_env().map(|c| c.api_key().to_string());
        let from_lookup = Credentials::from_lookup(|name| std::env::var(name).ok())
            .map(|c| c.api_key().to_string());

        match (from_env, from_lookup) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(GainersError::CredentialMissing(a)), Err(GainersError::CredentialMissing(b))) => {
                assert_eq!(a, b)
            }
            (a, b) => panic!("from_env {a:?} disagrees with lookup {b:?}"),
        }
    }

    #[test]
    fn debug_output_is_redacted() {
        let creds = Credentials::new("visible-key", "visible-secret");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("visible-key"));
        assert!(!rendered.contains("visible-secret"));
    }
}
