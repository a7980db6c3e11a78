//! Migration Builder
//!
//! Validated table definitions rendered to schema migrations.

use clap::Parser;
use colored::Colorize;
use mbuilder_cli::{Cli, run};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    // Logs go to stderr so rendered output stays pipeable
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = execute(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let stdout = std::io::stdout();
    run(cli, &cwd, &mut stdout.lock())
}
