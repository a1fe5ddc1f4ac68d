//! Fixed-column report tables.
//!
//! The column sets and their order are a contract: people diff these
//! reports over time, and the user table feeds spreadsheet imports.
//! Projection (record → row) is separate from rendering so the row shape
//! can be asserted without parsing table borders.

use tabled::Tabled;

use cloudscrape_core::{Node, NodeKind, User};

use crate::output::render_table;

// ── Row projections ─────────────────────────────────────────────────

/// Gateway and spare nodes share one shape.
#[derive(Tabled)]
pub struct GatewayRow {
    #[tabled(rename = "Name\n(mac)")]
    name: String,
    #[tabled(rename = "Users")]
    users: String,
    #[tabled(rename = "DL MB\nUL MB")]
    traffic: String,
    #[tabled(rename = "Up\n(Down)")]
    availability: String,
    #[tabled(rename = "IP Address\n(Firmware)")]
    address: String,
}

#[derive(Tabled)]
pub struct RelayRow {
    #[tabled(rename = "Name\n(mac)")]
    name: String,
    #[tabled(rename = "Users")]
    users: String,
    #[tabled(rename = "DL MB\nUL MB")]
    traffic: String,
    #[tabled(rename = "Gateway\n(Firmware)")]
    gateway: String,
    #[tabled(rename = "Up\n(Down)")]
    availability: String,
    #[tabled(rename = "Latency\n(Hops)")]
    latency: String,
}

#[derive(Tabled)]
pub struct UserRow {
    #[tabled(rename = "Name\n(mac)")]
    name: String,
    #[tabled(rename = "Node\n(mac)")]
    node: String,
    #[tabled(rename = "Blocked")]
    blocked: String,
    #[tabled(rename = "MB Down")]
    mb_down: String,
    #[tabled(rename = "MB Up")]
    mb_up: String,
}

impl From<&Node> for GatewayRow {
    fn from(n: &Node) -> Self {
        Self {
            name: format!("{}\n({})", n.name, n.mac),
            users: n.users_24.clone(),
            traffic: format!("{}\n({})", n.download_mb_24, n.upload_mb_24),
            availability: format!(
                "{:.1}%\n({:.1}%)",
                n.pct_time_as_gateway, n.pct_time_offline
            ),
            address: format!("{}\n({})", n.ip, n.firmware_version),
        }
    }
}

impl From<&Node> for RelayRow {
    fn from(n: &Node) -> Self {
        Self {
            name: format!("{}\n({})", n.name, n.mac),
            users: n.users_24.clone(),
            traffic: format!("{}\n({})", n.download_mb_24, n.upload_mb_24),
            gateway: format!("{}\n({})", n.gateway_name, n.firmware_version),
            availability: format!("{:.1}%\n({:.1}%)", n.pct_time_as_relay, n.pct_time_offline),
            latency: format!("{}ms\n({})", n.latency_ms, n.hop_count),
        }
    }
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            name: format!("{}\n({})", u.name, u.mac),
            node: format!("{}\n({})", u.node_name, u.node_mac),
            blocked: u.blocked.clone(),
            mb_down: format!("{:.2}", u.mb_down()),
            mb_up: format!("{:.2}", u.mb_up()),
        }
    }
}

// ── Category filtering ──────────────────────────────────────────────

fn of_kind(nodes: &[Node], kind: NodeKind) -> impl Iterator<Item = &Node> {
    nodes.iter().filter(move |n| n.kind == kind)
}

/// Project the nodes of one kind into that kind's row shape.
/// Nodes of every other kind are display-filtered out, never an error.
pub fn gateway_rows(nodes: &[Node], kind: NodeKind) -> Vec<GatewayRow> {
    of_kind(nodes, kind).map(GatewayRow::from).collect()
}

pub fn relay_rows(nodes: &[Node]) -> Vec<RelayRow> {
    of_kind(nodes, NodeKind::Relay).map(RelayRow::from).collect()
}

pub fn user_rows(users: &[User]) -> Vec<UserRow> {
    users.iter().map(UserRow::from).collect()
}

// ── Rendering ───────────────────────────────────────────────────────

/// Render the fixed-column table for one node category.
pub fn render_nodes(kind: NodeKind, nodes: &[Node]) -> String {
    match kind {
        NodeKind::Gateway | NodeKind::Spare => render_table(&gateway_rows(nodes, kind)),
        NodeKind::Relay => render_table(&relay_rows(nodes)),
    }
}

/// Render the user statistics table.
pub fn render_users(users: &[User]) -> String {
    render_table(&user_rows(users))
}

fn underline(text: &str) -> String {
    format!("{text}\n{}\n", "-".repeat(text.len()))
}

/// The full screen report: node tables per category, then users.
pub fn full_report(nodes: &[Node], users: &[User]) -> String {
    let mut report = underline("Node statistics for the last 24 hours");
    report.push('\n');

    for (title, kind) in [
        ("Gateway nodes", NodeKind::Gateway),
        ("Relay nodes", NodeKind::Relay),
        ("Spare nodes", NodeKind::Spare),
    ] {
        report.push_str(title);
        report.push('\n');
        report.push_str(&render_nodes(kind, nodes));
        report.push_str("\n\n");
    }

    report.push_str(&underline("User statistics for the last 24 hours"));
    report.push('\n');
    report.push_str("Users\n");
    report.push_str(&render_users(users));
    report.push('\n');

    report
}
