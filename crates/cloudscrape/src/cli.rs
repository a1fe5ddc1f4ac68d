//! Clap derive structures for the `cloudscrape` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use cloudscrape_core::NodeKind;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// cloudscrape -- usage statistics scraper for CloudTrax mesh dashboards
#[derive(Debug, Parser)]
#[command(
    name = "cloudscrape",
    version,
    about = "Extract node status and usage statistics from a CloudTrax dashboard",
    long_about = "Logs in to the CloudTrax web dashboard, scrapes the node status and\n\
        user statistics report pages, and renders or archives the results.\n\n\
        Networks and credentials live in the config file; see `cloudscrape report --help`.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Wifi network name as the dashboard knows it
    #[arg(long, short = 'n', env = "CLOUDTRAX_NETWORK", global = true)]
    pub network: Option<String>,

    /// Config file path (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for node/user listings
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,
}

// ── Output enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

/// Node kind filter for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindFilter {
    Gateway,
    Relay,
    Spare,
}

impl From<KindFilter> for NodeKind {
    fn from(kind: KindFilter) -> Self {
        match kind {
            KindFilter::Gateway => Self::Gateway,
            KindFilter::Relay => Self::Relay,
            KindFilter::Spare => Self::Spare,
        }
    }
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List mesh nodes with status and 24-hour usage
    #[command(alias = "n")]
    Nodes(NodesArgs),

    /// List wifi users with usage statistics
    #[command(alias = "u")]
    Users,

    /// Render the full usage report (gateway/relay/spare/user tables)
    #[command(alias = "r")]
    Report,

    /// Scrape and append node and user records to the usage log
    Record(RecordArgs),
}

#[derive(Debug, Args)]
pub struct NodesArgs {
    /// Only show nodes of one kind
    #[arg(long, value_enum)]
    pub kind: Option<KindFilter>,
}

#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Usage log database file
    #[arg(long, short = 'd')]
    pub database: PathBuf,
}
