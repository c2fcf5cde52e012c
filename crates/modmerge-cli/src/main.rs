//! modmerge CLI
//!
//! Installs a mod's mission files into a server mission folder, merging JSON
//! and XML documents instead of replacing them.

mod cli;
mod commands;
mod discovery;
mod error;
mod interactive;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: could not set up logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!(command = ?cli.command, "parsed arguments");

    let cwd = std::env::current_dir()?;
    match cli.command {
        Commands::Install(args) => commands::run_install(&cwd, &args),
        Commands::Resolve { path, config } => commands::run_resolve(&cwd, &path, config.as_deref()),
        Commands::Merge {
            target,
            source,
            config,
            output,
            path,
        } => commands::run_merge(
            &cwd,
            &target,
            &source,
            config.as_deref(),
            output.as_deref(),
            path.as_deref(),
        ),
    }
}
