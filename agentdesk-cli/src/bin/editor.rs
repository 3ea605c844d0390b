//! Terminal agent editor entry point

use agentdesk_core::infrastructure::http_client::{DEFAULT_API_URL, HttpAgentApi};
use agentdesk_core::tui;
use clap::Parser;
use std::error::Error;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "agentdesk", version, about = "Browse and edit agent records")]
struct Args {
    /// Base URL of the agentdesk REST API
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // The editor owns the terminal; no tracing subscriber is installed.
    let api = Arc::new(HttpAgentApi::new(&args.api_url)?);
    tui::run_editor(api, &args.api_url).await
}
