//! Command handlers.

pub mod nodes;
pub mod record;
pub mod report;
pub mod users;

use cloudscrape_core::CloudTrax;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler. The session is already
/// authenticated by the time we get here.
pub async fn dispatch(
    command: Command,
    trax: &mut CloudTrax,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Nodes(args) => nodes::handle(trax, &args, global).await,
        Command::Users => users::handle(trax, global).await,
        Command::Report => report::handle(trax, global).await,
        Command::Record(args) => record::handle(trax, &args, global).await,
    }
}
