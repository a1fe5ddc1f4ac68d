//! HTTP session and wire-format decoding for the CloudTrax mesh dashboard.
//!
//! The dashboard exposes no structured API; this crate is the boundary
//! layer that deals with what it does expose:
//!
//! - **[`DashboardClient`]** — cookie-authenticated session. `login()`
//!   posts the browser's login form; the page and image fetches reuse the
//!   resulting session cookie.
//! - **[`distill_table`]** — reduces an HTML report page to rows of
//!   per-cell text fragments, the intermediate form the decoders in
//!   `cloudscrape-core` consume.
//! - **[`decode_checkin_strip`]** — turns the per-node 24-hour status
//!   strip bitmap into gateway/relay/offline percentages.
//!
//! Everything here is mechanical extraction; interpretation of the
//! extracted values (status codes, schemas, report shapes) lives in
//! `cloudscrape-core`.

pub mod checkin;
pub mod distill;
pub mod error;
pub mod session;
pub mod transport;

pub use checkin::{CheckinBreakdown, decode_checkin_strip};
pub use distill::{DistilledRow, TableLocator, distill_table};
pub use error::Error;
pub use session::{DashboardClient, PagePaths};
pub use transport::{TlsMode, TransportConfig};
