//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use cloudscrape_config::ConfigError;
use cloudscrape_core::CoreError;

/// Exit codes. HTTP failures exit with the status code itself, matching
/// the long-standing behavior scripts around this tool depend on.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the dashboard")]
    #[diagnostic(
        code(cloudscrape::connection_failed),
        help(
            "Check that the dashboard is reachable from here.\n\
             Reason: {reason}"
        )
    )]
    Connection { reason: String },

    #[error("Dashboard returned HTTP {status}")]
    #[diagnostic(
        code(cloudscrape::http_error),
        help("The dashboard refused the request; it may be down or throttling.")
    )]
    Http { status: u16 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(cloudscrape::auth_failed),
        help(
            "Verify the username/password for this network in your config file.\n\
             Reason: {message}"
        )
    )]
    Auth { message: String },

    // ── Scraped data ─────────────────────────────────────────────────
    #[error("Dashboard output did not match the expected layout")]
    #[diagnostic(
        code(cloudscrape::scrape_failed),
        help(
            "The dashboard's report markup may have changed upstream.\n\
             Detail: {detail}"
        )
    )]
    Scrape { detail: String },

    // ── Storage ──────────────────────────────────────────────────────
    #[error("Usage log failure")]
    #[diagnostic(
        code(cloudscrape::store_failed),
        help("Detail: {detail}")
    )]
    Store { detail: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {source}")]
    #[diagnostic(
        code(cloudscrape::config),
        help("Config file location: {path}")
    )]
    Config {
        #[source]
        source: ConfigError,
        path: String,
    },
}

impl CliError {
    /// Map this error to a process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Connection { .. } => exit_code::CONNECTION,
            Self::Auth { .. } => exit_code::AUTH,
            // Scripts watch for the raw status here.
            Self::Http { status } => i32::from(*status),
            Self::Config { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Authentication { message } => Self::Auth { message },
            CoreError::Connection { reason } => Self::Connection { reason },
            CoreError::Http { status } => Self::Http { status },
            CoreError::Store(e) => Self::Store {
                detail: e.to_string(),
            },
            CoreError::StoreEncoding(e) => Self::Store {
                detail: e.to_string(),
            },
            // MalformedDocument, MalformedRow, UnknownStatusCode,
            // InvalidCheckinImage, Config — all data-quality failures.
            other => Self::Scrape {
                detail: other.to_string(),
            },
        }
    }
}
