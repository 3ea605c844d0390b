//! REST API server entry point
//!
//! Connects to the document store once, then serves `/api/agent` until the
//! process is stopped.

use agentdesk_core::application::AgentRepository;
use agentdesk_core::config::AppConfig;
use agentdesk_core::infrastructure::{server, store};
use clap::Parser;
use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "agentdesk-rest", version, about = "Agent record REST API server")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// REST API bind address (overrides config if specified)
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    init_tracing();
    info!("Starting agentdesk REST API server");

    let config = AppConfig::load(args.config.as_deref())?;
    // No connection string means nothing to serve.
    config.store.require_url()?;
    debug!(
        collection = %config.store.collection,
        blank_strings = ?config.update.blank_strings,
        "Configuration loaded"
    );

    let addr = match args.addr {
        Some(addr) => addr,
        None => config.rest.bind_addr()?,
    };

    let store = store::connect(&config.store).await?;
    let repository =
        AgentRepository::new(store).with_blank_policy(config.update.blank_strings);

    info!(addr = %addr, "REST server starting");
    server::serve(repository, &config.rest, addr).await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .init();
}
