//! `nodes` — flat node listing.

use tabled::Tabled;

use cloudscrape_core::{CloudTrax, Node, NodeKind};

use crate::cli::{GlobalOpts, NodesArgs};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Users")]
    users: String,
    #[tabled(rename = "DL MB")]
    download: String,
    #[tabled(rename = "UL MB")]
    upload: String,
    #[tabled(rename = "Up %")]
    uptime_pct: String,
}

impl From<&Node> for NodeRow {
    fn from(n: &Node) -> Self {
        let up_pct = match n.kind {
            NodeKind::Relay => n.pct_time_as_relay,
            NodeKind::Gateway | NodeKind::Spare => n.pct_time_as_gateway,
        };
        Self {
            name: n.name.clone(),
            mac: n.mac.to_string(),
            kind: n.kind.label().into(),
            status: if n.status.is_up() { "up" } else { "down" }.into(),
            ip: n.ip.clone(),
            users: n.users_24.clone(),
            download: n.download_mb_24.clone(),
            upload: n.upload_mb_24.clone(),
            uptime_pct: format!("{up_pct:.1}"),
        }
    }
}

pub async fn handle(
    trax: &mut CloudTrax,
    args: &NodesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let nodes = trax.get_nodes().await?;

    let filtered: Vec<Node> = match args.kind {
        Some(kind) => {
            let kind: NodeKind = kind.into();
            nodes.iter().filter(|n| n.kind == kind).cloned().collect()
        }
        None => nodes.to_vec(),
    };

    let out = output::render_list(
        global.output,
        &filtered,
        |n| NodeRow::from(n),
        |n| n.mac.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
