// ── Core error types ──
//
// User-facing errors from cloudscrape-core. Consumers never see reqwest or
// redb internals directly; the From impls translate boundary-layer errors
// into domain-appropriate variants. Data-quality failures (malformed rows,
// unknown status codes) carry enough context to identify the offending
// record in a page of hundreds.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session errors ───────────────────────────────────────────────
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    #[error("cannot reach dashboard: {reason}")]
    Connection { reason: String },

    #[error("dashboard returned HTTP {status}")]
    Http { status: u16 },

    // ── Data-quality errors ──────────────────────────────────────────
    /// The fetched page had no table where the schema says one lives.
    #[error("malformed document: no table matching {locator}")]
    MalformedDocument { locator: String },

    /// A distilled row does not fit its decoder's schema.
    #[error("malformed {record} row: {detail}")]
    MalformedRow {
        record: &'static str,
        detail: String,
    },

    /// A node's status token fell outside the closed 8-code table.
    #[error("unknown node status code {code:?}")]
    UnknownStatusCode { code: String },

    /// A node's checkin strip could not be decoded.
    #[error("invalid checkin image for {mac}: {reason}")]
    InvalidCheckinImage { mac: String, reason: String },

    // ── Storage errors ───────────────────────────────────────────────
    #[error("record store failure: {0}")]
    Store(#[from] redb::Error),

    #[error("record serialization failure: {0}")]
    StoreEncoding(#[from] serde_json::Error),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from boundary-layer errors ────────────────────────────

impl From<cloudscrape_api::Error> for CoreError {
    fn from(err: cloudscrape_api::Error) -> Self {
        use cloudscrape_api::Error as ApiError;

        match err {
            ApiError::Authentication { message } => Self::Authentication { message },
            ApiError::Transport(e) => Self::Connection {
                reason: e.to_string(),
            },
            ApiError::InvalidUrl(e) => Self::Config {
                message: format!("invalid URL: {e}"),
            },
            ApiError::Tls(reason) => Self::Connection { reason },
            ApiError::Http { status } => Self::Http { status },
            ApiError::MalformedDocument { locator } => Self::MalformedDocument { locator },
            // Checkin decode errors are re-wrapped at the call site with the
            // node's mac; an unattributed image error means a bug.
            ApiError::InvalidCheckinImage { reason } => Self::InvalidCheckinImage {
                mac: "(unknown)".into(),
                reason,
            },
        }
    }
}
