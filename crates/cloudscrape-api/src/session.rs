// Dashboard HTTP session
//
// Wraps `reqwest::Client` with CloudTrax-specific URL construction and the
// cookie-based login flow. The dashboard has no structured API: every fetch
// returns either an HTML report page or raw image bytes, which the distill
// and checkin modules turn into data.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Relative paths of the dashboard pages a session talks to.
///
/// These come from configuration, not code: the upstream dashboard has
/// renamed its pages before and will again.
#[derive(Debug, Clone)]
pub struct PagePaths {
    pub login: String,
    pub data: String,
    pub user: String,
    pub checkin: String,
}

/// Authenticated HTTP session against one CloudTrax dashboard.
///
/// Construction builds the client and cookie jar but does not touch the
/// network; call [`login`](Self::login) first. The session cookie lives in
/// the jar, so after a successful login every fetch is authenticated
/// automatically.
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: Url,
    paths: PagePaths,
}

impl DashboardClient {
    /// Create a new session client from transport settings.
    pub fn new(base_url: Url, paths: PagePaths, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            paths,
        })
    }

    /// Create a session client around a pre-built `reqwest::Client`.
    ///
    /// The caller is responsible for attaching a cookie jar if the login
    /// flow is going to be exercised.
    pub fn with_client(http: reqwest::Client, base_url: Url, paths: PagePaths) -> Self {
        Self {
            http,
            base_url,
            paths,
        }
    }

    /// The dashboard base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn page_url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    /// Authenticate with the dashboard.
    ///
    /// Posts the same form the browser login page submits; on success the
    /// dashboard sets a session cookie in the jar. A non-success status is
    /// an authentication failure, not a generic HTTP error — the dashboard
    /// answers wrong credentials with a redirect-less error page.
    pub async fn login(&self, account: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.page_url(&self.paths.login)?;

        info!("logging in to dashboard at {url}");

        let form = [
            ("account", account),
            ("password", password.expose_secret()),
            ("status", "View Status"),
        ];

        let resp = self
            .http
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status})"),
            });
        }

        debug!("login successful");
        Ok(())
    }

    /// Fetch the node status report page for a network.
    ///
    /// `showall` and `details` make the dashboard emit every node with the
    /// full 13-column table the node decoder expects.
    pub async fn fetch_status_page(&self, network: &str) -> Result<String, Error> {
        let url = self.page_url(&self.paths.data)?;

        info!(network, "requesting network status");

        let page = self
            .fetch_text(url, &[("network", network), ("showall", "1"), ("details", "1")])
            .await?;

        info!("received network status ok");
        Ok(page)
    }

    /// Fetch the wifi user statistics page for a network.
    pub async fn fetch_usage_page(&self, network: &str) -> Result<String, Error> {
        let url = self.page_url(&self.paths.user)?;

        info!(network, "requesting user statistics");

        let page = self.fetch_text(url, &[("network", network)]).await?;

        info!("received user statistics ok");
        Ok(page)
    }

    /// Fetch the 24-hour checkin strip image for one node.
    ///
    /// `legend=0` suppresses the color legend so the strip is the whole
    /// image; the checkin decoder depends on that framing.
    pub async fn fetch_checkin_image(&self, mac: &str) -> Result<Vec<u8>, Error> {
        let url = self.page_url(&self.paths.checkin)?;

        debug!(mac, "requesting node checkin strip");

        let resp = self
            .http
            .get(url)
            .query(&[("mac", mac), ("legend", "0")])
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
            });
        }

        let bytes = resp.bytes().await.map_err(Error::Transport)?;
        Ok(bytes.to_vec())
    }

    async fn fetch_text(&self, url: Url, query: &[(&str, &str)]) -> Result<String, Error> {
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(Error::Transport)
    }
}
