// ── Scrape orchestration ──
//
// Owns the dashboard session and drives the fetch→distill→decode pipeline
// for nodes and users. Decoded collections are cached with explicit stale
// flags: a flag starts stale, is cleared by a successful refresh, and is
// raised again only by invalidate(). "Cache happens to be empty" and
// "cache needs refreshing" are deliberately separate notions — an empty
// network stays fresh until someone asks for new data.

use tracing::{debug, info};

use cloudscrape_api::{DashboardClient, TableLocator, TlsMode, TransportConfig, distill_table};

use crate::config::{Credentials, ScrapeConfig};
use crate::decode::{decode_node, decode_user};
use crate::error::CoreError;
use crate::model::{Node, User};

/// The node status table on the data page.
const NODE_TABLE: TableLocator = TableLocator::Id("mytable");
/// The user statistics table on the usage page.
const USER_TABLE: TableLocator = TableLocator::Class("inline sortable");

/// Scraping session against one network on one CloudTrax dashboard.
///
/// Single-owner, single-flow: every fetch blocks the caller, and checkin
/// strips are fetched strictly one node at a time. Sharing across tasks
/// needs external synchronization; nothing here expects it.
pub struct CloudTrax {
    client: DashboardClient,
    credentials: Credentials,
    network: String,

    nodes: Vec<Node>,
    users: Vec<User>,
    nodes_stale: bool,
    users_stale: bool,
}

impl CloudTrax {
    /// Build a scraping session from configuration. Does not touch the
    /// network; call [`login`](Self::login) first.
    pub fn new(config: &ScrapeConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: if config.insecure {
                TlsMode::DangerAcceptInvalid
            } else {
                TlsMode::System
            },
            timeout: config.timeout,
        };

        let client = DashboardClient::new(
            config.base_url.clone(),
            (&config.pages).into(),
            &transport,
        )?;

        Ok(Self {
            client,
            credentials: config.credentials.clone(),
            network: config.network.clone(),
            nodes: Vec::new(),
            users: Vec::new(),
            nodes_stale: true,
            users_stale: true,
        })
    }

    /// The network this session scrapes.
    pub fn network(&self) -> &str {
        &self.network
    }

    /// Authenticate with the dashboard.
    ///
    /// Failure is returned, not acted on: the caller decides whether a
    /// dead dashboard aborts the process.
    pub async fn login(&self) -> Result<(), CoreError> {
        self.client
            .login(&self.credentials.account, &self.credentials.password)
            .await?;
        Ok(())
    }

    /// Current nodes, refreshing first if the cache is stale.
    pub async fn get_nodes(&mut self) -> Result<&[Node], CoreError> {
        if self.nodes_stale {
            info!("node cache is stale, refreshing from dashboard");
            self.refresh_nodes().await?;
        }
        Ok(&self.nodes)
    }

    /// Current users, refreshing first if the cache is stale.
    pub async fn get_users(&mut self) -> Result<&[User], CoreError> {
        if self.users_stale {
            info!("user cache is stale, refreshing from dashboard");
            self.refresh_users().await?;
        }
        Ok(&self.users)
    }

    /// Mark both caches stale so the next accessor refetches.
    pub fn invalidate(&mut self) {
        self.nodes_stale = true;
        self.users_stale = true;
    }

    /// Fetch, distill, and decode the node status page, then complete each
    /// node with its checkin strip. Replaces the cached collection
    /// wholesale. One undecodable row or strip fails the whole refresh and
    /// leaves the previous cache (still marked stale) in place.
    pub async fn refresh_nodes(&mut self) -> Result<&[Node], CoreError> {
        let page = self.client.fetch_status_page(&self.network).await?;
        let rows = distill_table(&page, &NODE_TABLE)?;

        debug!(rows = rows.len(), "distilled node status table");

        let mut nodes = Vec::with_capacity(rows.len());

        for row in &rows {
            let seed = decode_node(row)?;
            let checkin = self.fetch_checkin(seed.mac().as_str()).await?;
            nodes.push(seed.into_node(checkin));
        }

        info!(nodes = nodes.len(), "node refresh complete");

        self.nodes = nodes;
        self.nodes_stale = false;
        Ok(&self.nodes)
    }

    /// Fetch, distill, and decode the user statistics page, replacing the
    /// cached collection wholesale.
    pub async fn refresh_users(&mut self) -> Result<&[User], CoreError> {
        let page = self.client.fetch_usage_page(&self.network).await?;
        let rows = distill_table(&page, &USER_TABLE)?;

        debug!(rows = rows.len(), "distilled user statistics table");

        let users = rows
            .iter()
            .map(decode_user)
            .collect::<Result<Vec<_>, _>>()?;

        info!(users = users.len(), "user refresh complete");

        self.users = users;
        self.users_stale = false;
        Ok(&self.users)
    }

    /// Fetch and decode one node's checkin strip, attributing image
    /// failures to the node's mac.
    async fn fetch_checkin(
        &self,
        mac: &str,
    ) -> Result<cloudscrape_api::CheckinBreakdown, CoreError> {
        let bytes = self.client.fetch_checkin_image(mac).await?;

        cloudscrape_api::decode_checkin_strip(&bytes).map_err(|err| match err {
            cloudscrape_api::Error::InvalidCheckinImage { reason } => {
                CoreError::InvalidCheckinImage {
                    mac: mac.to_owned(),
                    reason,
                }
            }
            other => other.into(),
        })
    }
}
