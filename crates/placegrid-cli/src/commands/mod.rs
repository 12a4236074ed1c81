//! Command implementations

mod merge;
mod plan;
mod probe;
mod scrape;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    match cli.command {
        Commands::Plan(args) => plan::execute(args, cli.config.as_deref(), &output),
        Commands::Scrape(args) => scrape::execute(args, cli.config.as_deref(), &output).await,
        Commands::Probe(args) => probe::execute(args, &output).await,
        Commands::Merge(args) => merge::execute(args, &output),
    }
}
