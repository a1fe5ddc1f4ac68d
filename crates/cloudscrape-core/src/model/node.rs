// ── Node domain types ──

use serde::{Deserialize, Serialize};

use cloudscrape_api::CheckinBreakdown;

use super::mac::MacAddress;

/// A node's operational role in the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Gateway,
    Relay,
    Spare,
}

impl NodeKind {
    /// Lowercase label as used in reports and stored records.
    pub fn label(self) -> &'static str {
        match self {
            Self::Gateway => "gateway",
            Self::Relay => "relay",
            Self::Spare => "spare",
        }
    }
}

/// Whether the node is currently reachable, independent of its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeStatus {
    Up,
    Down,
}

impl NodeStatus {
    pub fn is_up(self) -> bool {
        matches!(self, Self::Up)
    }
}

/// One mesh device as reported by the dashboard's status page, plus the
/// role-history percentages decoded from its checkin strip.
///
/// Constructed once per scrape cycle and immutable thereafter; the next
/// refresh replaces the collection wholesale. String-typed fields hold the
/// dashboard's rendering verbatim (uptime, load, traffic figures come
/// pre-formatted and the report reuses them unchanged).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    pub status: NodeStatus,

    // Identity
    pub name: String,
    pub comment: String,
    pub mac: MacAddress,
    pub ip: String,

    // Radio
    pub channel_24: String,
    pub channel_58: String,

    // 24-hour load
    pub users_24: String,
    pub download_mb_24: String,
    pub upload_mb_24: String,

    // Health
    pub uptime: String,
    pub firmware_version: String,
    pub firmware_name: String,
    pub load: String,
    pub free_memory: String,
    pub time_since_checkin: String,

    // Topology (latency/hops only meaningful for relays)
    pub gateway_name: String,
    pub gateway_ip: String,
    pub hop_count: String,
    pub latency_ms: String,

    // Derived from the checkin strip
    pub pct_time_as_gateway: f64,
    pub pct_time_as_relay: f64,
    pub pct_time_offline: f64,
}

impl Node {
    /// The decoded checkin triple as one value.
    pub fn checkin(&self) -> CheckinBreakdown {
        CheckinBreakdown {
            pct_time_as_gateway: self.pct_time_as_gateway,
            pct_time_as_relay: self.pct_time_as_relay,
            pct_time_offline: self.pct_time_offline,
        }
    }
}
