//! TLS configuration for the REST client.
//!
//! Builds a [`rustls::ClientConfig`] that trusts the Mozilla root program
//! (via `webpki-roots`), optionally extended with the certificates of a
//! local PEM bundle for networks that intercept TLS.

use std::path::Path;

use rustls::ClientConfig;
use tracing::debug;

use crate::Result;

/// Builds a [`ClientConfig`] from the bundled web roots plus any
/// certificates found in `extra_ca`.
///
/// # Errors
///
/// Returns [`GainersError::Tls`](crate::GainersError::Tls) if the bundle
/// cannot be read or contains no parsable certificate.
pub fn build_tls_config(extra_ca: Option<&Path>) -> Result<ClientConfig> {
    let mut root_store = rustls::RootCertStore {
        roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
    };

    if let Some(path) = extra_ca {
        let pem = std::fs::read(path).map_err(|e| {
            crate::GainersError::Tls(format!("failed to read {}: {e}", path.display()))
        })?;

        let certs: Vec<_> = rustls_pemfile::certs(&mut &pem[..])
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| crate::GainersError::Tls(format!("failed to parse CA PEM: {e}")))?;

        let (added, ignored) = root_store.add_parsable_certificates(certs);
        if added == 0 {
            return Err(crate::GainersError::Tls(format!(
                "no usable certificates in {}",
                path.display()
            )));
        }
        debug!(path = %path.display(), added, ignored, "added extra trust roots");
    }

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_default_roots() {
        assert!(build_tls_config(None).is_ok());
    }

    #[test]
    fn missing_bundle_is_an_error() {
        let err = build_tls_config(Some(Path::new("/nonexistent/ca.pem"))).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn bundle_without_certificates_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "not a certificate\n").unwrap();
        let err = build_tls_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("no usable certificates"));
    }
}
