//! # autopanel — command-line control panel
//!
//! Composition root that wires the HTTP adapter into the application
//! services and runs one command against the backend.
//!
//! ## Responsibilities
//! - Parse the command line
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Construct the backend client and the application services
//! - Run the command and print its output
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod cli;
mod commands;
mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use autopanel_adapter_http_reqwest::HttpBackend;

use crate::cli::Cli;
use crate::commands::Panel;
use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let filter =
        EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let backend = HttpBackend::new(&config.backend)?;
    tracing::debug!(base_url = %backend.base_url(), "backend configured");

    let output = Panel::new(backend).run(cli.command).await?;
    println!("{output}");
    Ok(())
}
