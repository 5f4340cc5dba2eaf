//! HTTP client construction shared by the auth and submission clients.
//!
//! Self-hosted servers often run behind a private CA or a self-signed
//! certificate, so the trust chain is configurable.

use std::time::Duration;

use reqwest::{Certificate, Client};

use crate::{Error, Result};

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
const PEM_CERTIFICATE_MARKER: &str = "-----BEGIN CERTIFICATE-----";

/// Which server certificates the client accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TrustMode {
    /// Bundled web PKI roots.
    #[default]
    Platform,
    /// Only the given PEM-encoded root certificate.
    CustomCertificate { pem: String },
    /// Any certificate for any host name.
    TrustAll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    pub trust: TrustMode,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            trust: TrustMode::Platform,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl TransportOptions {
    pub fn with_trust(trust: TrustMode) -> Self {
        Self {
            trust,
            ..Self::default()
        }
    }
}

/// Builds the HTTP client used for every call to the server.
pub fn build_client(options: &TransportOptions) -> Result<Client> {
    let mut builder = Client::builder()
        .use_rustls_tls()
        .connect_timeout(options.connect_timeout)
        .timeout(options.request_timeout);

    match &options.trust {
        TrustMode::Platform => {}
        TrustMode::CustomCertificate { pem } => {
            if !pem.contains(PEM_CERTIFICATE_MARKER) {
                return Err(Error::Transport(
                    "Custom certificate is not a PEM encoded certificate".to_string(),
                ));
            }
            let certificate = Certificate::from_pem(pem.as_bytes()).map_err(|error| {
                Error::Transport(format!("Failed to parse custom certificate: {error}"))
            })?;
            builder = builder
                .tls_built_in_root_certs(false)
                .add_root_certificate(certificate);
        }
        TrustMode::TrustAll => {
            tracing::warn!("TLS certificate verification is disabled for this session");
            builder = builder.danger_accept_invalid_certs(true);
        }
    }

    builder
        .build()
        .map_err(|error| Error::Transport(format!("Failed to construct HTTP client: {error}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_use_platform_trust_and_timeouts() {
        let options = TransportOptions::default();
        assert_eq!(options.trust, TrustMode::Platform);
        assert_eq!(options.connect_timeout, Duration::from_secs(30));
        assert_eq!(options.request_timeout, Duration::from_secs(120));
    }

    #[test]
    fn platform_and_trust_all_clients_build() {
        assert!(build_client(&TransportOptions::default()).is_ok());
        assert!(build_client(&TransportOptions::with_trust(TrustMode::TrustAll)).is_ok());
    }

    #[test]
    fn custom_certificate_requires_pem() {
        let options = TransportOptions::with_trust(TrustMode::CustomCertificate {
            pem: "not a certificate".to_string(),
        });
        let err = build_client(&options).unwrap_err();
        assert!(matches!(err, Error::Transport(_)), "unexpected error: {err:?}");
    }
}
