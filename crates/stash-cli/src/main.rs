//! stash: update manifest and install telemetry server

use clap::Parser;
use stash_cli::{commands, logging, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    match cli.command {
        Commands::Serve(args) => commands::serve::run(args).await?,
    }

    Ok(())
}
