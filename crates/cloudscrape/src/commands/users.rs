//! `users` — wifi user listing.

use cloudscrape_core::CloudTrax;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;
use crate::report::UserRow;

pub async fn handle(trax: &mut CloudTrax, global: &GlobalOpts) -> Result<(), CliError> {
    let users = trax.get_users().await?;

    let out = output::render_list(
        global.output,
        users,
        |u| UserRow::from(u),
        |u| u.mac.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
