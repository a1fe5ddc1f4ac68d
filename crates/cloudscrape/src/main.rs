mod cli;
mod commands;
mod error;
mod output;
mod report;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cloudscrape_core::CloudTrax;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose, cli.global.quiet);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, quiet: bool) {
    let filter = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let scrape_config = build_scrape_config(&cli.global)?;

    let mut trax = CloudTrax::new(&scrape_config)?;
    trax.login().await?;

    tracing::debug!(command = ?cli.command, "dispatching command");
    commands::dispatch(cli.command, &mut trax, &cli.global).await
}

/// Build a `ScrapeConfig` from the config file plus CLI overrides.
fn build_scrape_config(global: &cli::GlobalOpts) -> Result<cloudscrape_core::ScrapeConfig, CliError> {
    let path = global
        .config
        .clone()
        .unwrap_or_else(cloudscrape_config::config_path);

    let into_cli_error = |source| CliError::Config {
        source,
        path: path.display().to_string(),
    };

    let config = cloudscrape_config::load_config(global.config.as_ref()).map_err(into_cli_error)?;

    let mut scrape_config = cloudscrape_config::resolve_network(&config, global.network.as_deref())
        .map_err(into_cli_error)?;

    if let Some(timeout) = global.timeout {
        scrape_config.timeout = std::time::Duration::from_secs(timeout);
    }
    if global.insecure {
        scrape_config.insecure = true;
    }

    Ok(scrape_config)
}
