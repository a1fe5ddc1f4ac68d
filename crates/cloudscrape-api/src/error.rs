use thiserror::Error;

/// Top-level error type for the `cloudscrape-api` crate.
///
/// Covers every failure mode at the dashboard boundary: authentication,
/// transport, unexpected HTTP statuses, and the two wire formats the
/// dashboard speaks (HTML report tables, checkin strip images).
/// `cloudscrape-core` maps these into domain-level errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed (rejected credentials, unexpected login response).
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The dashboard answered with a non-success status.
    #[error("dashboard returned HTTP {status}")]
    Http { status: u16 },

    // ── Wire formats ────────────────────────────────────────────────
    /// The expected table was not found in the fetched document.
    #[error("malformed document: no table matching {locator}")]
    MalformedDocument { locator: String },

    /// Checkin strip bytes could not be decoded into percentages.
    #[error("invalid checkin image: {reason}")]
    InvalidCheckinImage { reason: String },
}

impl Error {
    /// Returns `true` if this is a transient transport problem, as opposed
    /// to a structural mismatch with the dashboard's output.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status } => *status >= 500,
            _ => false,
        }
    }
}
