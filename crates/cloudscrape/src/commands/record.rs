//! `record` — archive a scrape into the usage log.

use tracing::info;

use cloudscrape_core::{CloudTrax, RecordStore};

use crate::cli::{GlobalOpts, RecordArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    trax: &mut CloudTrax,
    args: &RecordArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = RecordStore::open(&args.database)?;

    let nodes = trax.get_nodes().await?.to_vec();
    let users = trax.get_users().await?.to_vec();

    store.add_records(&nodes)?;
    store.add_user_records(&users)?;

    info!(
        nodes = nodes.len(),
        users = users.len(),
        database = %args.database.display(),
        "scrape archived"
    );

    output::print_output(
        &format!(
            "Recorded {} node and {} user snapshots to {}",
            nodes.len(),
            users.len(),
            args.database.display()
        ),
        global.quiet,
    );
    Ok(())
}
