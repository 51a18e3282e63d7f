//! Binary crate for the `skycast` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The login and weather screens (interactive prompts + rendering)
//! - The federated sign-in gateway

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod gateway;
mod screens;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
