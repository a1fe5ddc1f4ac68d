//! Domain layer between `cloudscrape-api` and consumers (CLI, archival).
//!
//! This crate owns the business logic of mesh scraping:
//!
//! - **[`CloudTrax`]** — scrape orchestrator. Owns the authenticated
//!   session, drives fetch→distill→decode for nodes and users, and caches
//!   each collection behind an explicit stale flag.
//! - **Domain model** ([`model`]) — canonical [`Node`] / [`User`] records
//!   with closed [`NodeKind`] / [`NodeStatus`] enums derived from the
//!   dashboard's coded status tokens.
//! - **[`decode`]** — pure row decoders mapping distilled table rows onto
//!   the model, enforcing the fixed cell schemas.
//! - **[`RecordStore`]** — append-only usage log; every refresh can be
//!   archived as timestamped rows.
//!
//! All errors funnel into [`CoreError`]; nothing here exits the process —
//! callers decide what is fatal.

pub mod config;
pub mod decode;
pub mod error;
pub mod model;
pub mod scraper;
pub mod store;

pub use config::{Credentials, PageConfig, ScrapeConfig};
pub use decode::{NodeSeed, classify_status, decode_node, decode_user};
pub use error::CoreError;
pub use model::{MacAddress, Node, NodeKind, NodeStatus, User};
pub use scraper::CloudTrax;
pub use store::{NodeRecord, RecordStore, UserRecord};

// The checkin triple crosses the api/core boundary unchanged; re-export it
// so consumers don't need a direct api dependency.
pub use cloudscrape_api::CheckinBreakdown;
