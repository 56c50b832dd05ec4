use anyhow::Result;
use clap::Parser;

use terpwise_rs::analyzer::workflow::launch;
use terpwise_rs::cli;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let config = args.into_config()?;

    launch(&config).await
}
