//! `report` — the full screen report.

use std::io::IsTerminal;

use owo_colors::OwoColorize;

use cloudscrape_core::CloudTrax;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;
use crate::report;

pub async fn handle(trax: &mut CloudTrax, global: &GlobalOpts) -> Result<(), CliError> {
    // Nodes are cloned out so the users fetch can re-borrow the session.
    let nodes = trax.get_nodes().await?.to_vec();
    let users = trax.get_users().await?.to_vec();

    let heading = format!("Usage report for network '{}'", trax.network());
    let heading = if std::io::stdout().is_terminal() {
        heading.bold().to_string()
    } else {
        heading
    };

    let body = report::full_report(&nodes, &users);
    output::print_output(&format!("{heading}\n\n{body}"), global.quiet);
    Ok(())
}
