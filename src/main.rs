//! conflict-bench CLI
//!
//! Measures write-conflict latency by hammering one row set from many
//! concurrent connections and exporting the latency distribution.

use anyhow::Result;
use clap::Parser;
use conflict_bench::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    cli.run().await
}
