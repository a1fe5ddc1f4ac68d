// Shared transport configuration for building reqwest::Client instances.
//
// The dashboard session is cookie-authenticated, so every client gets a
// cookie jar. TLS and timeout settings are caller-supplied; per-request
// timeout is a first-class setting rather than whatever reqwest defaults to.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;

/// TLS verification mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Accept any certificate (for dashboards behind self-signed proxies).
    DangerAcceptInvalid,
}

/// Transport settings shared by every request in a session.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    ///
    /// The returned client carries a fresh cookie jar; the login response
    /// stores the session cookie there and all later fetches reuse it.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let jar = Arc::new(Jar::default());

        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("cloudscrape/", env!("CARGO_PKG_VERSION")))
            .cookie_provider(jar);

        if self.tls == TlsMode::DangerAcceptInvalid {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
            .build()
            .map_err(|e| crate::error::Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}
