//! TLS configuration for `https`/`wss` origins.
//!
//! Builds a [`rustls::ClientConfig`] trusting the bundled webpki roots plus
//! any extra CA certificates from a PEM file, so self-hosted servers with a
//! private CA work for both the REST client and the live channel.

use std::path::Path;

use rustls::ClientConfig;
use tracing::info;

use crate::{Result, WatchlistError};

/// Builds a [`ClientConfig`] from the webpki root bundle and, when given,
/// the certificates in `extra_ca_pem`.
///
/// # Errors
///
/// Returns [`WatchlistError::Tls`] if the PEM file cannot be read, cannot be
/// parsed, or contains no certificates.
pub fn build_tls_config(extra_ca_pem: Option<&Path>) -> Result<ClientConfig> {
    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    if let Some(path) = extra_ca_pem {
        let pem = std::fs::read(path)
            .map_err(|e| WatchlistError::Tls(format!("failed to read {}: {e}", path.display())))?;

        let certs: Vec<_> = rustls_pemfile::certs(&mut &pem[..])
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| WatchlistError::Tls(format!("failed to parse CA PEM: {e}")))?;

        if certs.is_empty() {
            return Err(WatchlistError::Tls(format!(
                "no certificates found in {}",
                path.display()
            )));
        }

        let (added, ignored) = root_store.add_parsable_certificates(certs);
        info!(added, ignored, path = %path.display(), "Loaded extra CA certificates");
    }

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(config)
}
