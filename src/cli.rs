use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Quilt snapshot inspector.
#[derive(Parser)]
#[command(
    name = "quilt",
    version,
    about = "Inspect and reassemble rank-partitioned simulation snapshots"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// List the snapshot steps available in an output directory.
    Steps(StepsArgs),
    /// Print layout and dataset metadata for an output directory.
    Info(InfoArgs),
    /// Assemble one or more steps and write the global field to a file.
    Export(ExportArgs),
    /// Poll an output directory and summarize each new step as it appears.
    Watch(WatchArgs),
}

/// Arguments for the `steps` subcommand.
#[derive(clap::Args)]
pub struct StepsArgs {
    /// Path to TOML configuration file (defaults used if absent).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base outputs directory (contains rank_layout.csv and snapshots/).
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Snapshot format: 'csv' or 'nc'.
    #[arg(short, long)]
    pub format: Option<String>,
}

/// Arguments for the `info` subcommand.
#[derive(clap::Args)]
pub struct InfoArgs {
    /// Path to TOML configuration file (defaults used if absent).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base outputs directory.
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Snapshot format: 'csv' or 'nc'.
    #[arg(short, long)]
    pub format: Option<String>,
}

/// Arguments for the `export` subcommand.
#[derive(clap::Args)]
pub struct ExportArgs {
    /// Path to TOML configuration file (defaults used if absent).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base outputs directory.
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Snapshot format: 'csv' or 'nc'.
    #[arg(short, long)]
    pub format: Option<String>,

    /// NetCDF variable name (ignored for CSV snapshots).
    #[arg(long)]
    pub var: Option<String>,

    /// Snapshot step to export (default: latest).
    #[arg(short, long, conflicts_with = "steps")]
    pub step: Option<u32>,

    /// Export a selection of steps: 'a-b' (inclusive range, either end open)
    /// or 'i,j,k'. Each step gets a _SSSSS suffix before the extension.
    #[arg(long)]
    pub steps: Option<String>,

    /// Output file; '.nc' extension selects NetCDF, anything else CSV.
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the `watch` subcommand.
#[derive(clap::Args)]
pub struct WatchArgs {
    /// Path to TOML configuration file (defaults used if absent).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base outputs directory.
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Snapshot format: 'csv' or 'nc'.
    #[arg(short, long)]
    pub format: Option<String>,

    /// NetCDF variable name (ignored for CSV snapshots).
    #[arg(long)]
    pub var: Option<String>,

    /// Polling interval in seconds.
    #[arg(short, long)]
    pub interval: Option<f64>,

    /// Summarize the latest step on every poll, even if it didn't change.
    #[arg(long)]
    pub redraw_same: bool,
}
