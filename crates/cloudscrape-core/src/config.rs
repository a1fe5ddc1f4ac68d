// ── Runtime scrape configuration ──
//
// These types describe *how* to reach one dashboard network: URL, page
// paths, credentials, and transport tuning. They carry credential data but
// never touch disk — the CLI builds a `ScrapeConfig` from its config file
// and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use cloudscrape_api::PagePaths;

/// Per-network dashboard credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub account: String,
    pub password: SecretString,
}

/// Configuration for scraping a single network.
///
/// Built by the CLI, passed to [`CloudTrax::new`](crate::CloudTrax::new) --
/// core never reads config files. Immutable after construction.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Dashboard base URL (e.g., `https://www.cloudtrax.com`).
    pub base_url: Url,
    /// Relative paths of the login/data/user/checkin pages.
    pub pages: PageConfig,
    /// The wifi network name as the dashboard knows it.
    pub network: String,
    /// Login credentials for this network.
    pub credentials: Credentials,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Accept invalid TLS certificates.
    pub insecure: bool,
}

/// Owned mirror of [`PagePaths`] so config stays serde-friendly upstream.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub login: String,
    pub data: String,
    pub user: String,
    pub checkin: String,
}

impl From<&PageConfig> for PagePaths {
    fn from(pages: &PageConfig) -> Self {
        Self {
            login: pages.login.clone(),
            data: pages.data.clone(),
            user: pages.user.clone(),
            checkin: pages.checkin.clone(),
        }
    }
}
