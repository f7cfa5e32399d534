//! Bullion Store CLI

use clap::Parser;

mod cli;
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    logging::init_subscriber(&cli.logging)?;

    cli.run().await
}
