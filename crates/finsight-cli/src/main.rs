//! Finsight CLI - Personal finance dashboard
//!
//! Usage:
//!   finsight categorize "Uber ride"     Show the category for a description
//!   finsight dashboard --sample         Dashboard over one batch of sample data
//!   finsight sample --json              Print generated sample transactions
//!   finsight shell --tier premium       Interactive session

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Categorize { description } => commands::cmd_categorize(&description.join(" ")),
        Commands::Dashboard { sample, json } => {
            let (config, _) = commands::load_config(cli.config.as_deref(), cli.no_delay)?;
            commands::cmd_dashboard(config, cli.tier, cli.seed, sample, json)
        }
        Commands::Sample { json } => {
            let (config, _) = commands::load_config(cli.config.as_deref(), cli.no_delay)?;
            commands::cmd_sample(&config, cli.seed, json)
        }
        Commands::Config => {
            let (config, source) = commands::load_config(cli.config.as_deref(), cli.no_delay)?;
            commands::cmd_config(&config, &source);
            Ok(())
        }
        Commands::Shell => {
            let (config, _) = commands::load_config(cli.config.as_deref(), cli.no_delay)?;
            commands::cmd_shell(config, cli.tier, cli.seed).await
        }
    }
}
