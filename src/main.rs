mod cli;
mod config;
mod export_cmd;
mod info_cmd;
mod logging;
mod steps_cmd;
mod watch_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Steps(args) => steps_cmd::run(args),
        Command::Info(args) => info_cmd::run(args),
        Command::Export(args) => export_cmd::run(args),
        Command::Watch(args) => watch_cmd::run(args),
    }
}
