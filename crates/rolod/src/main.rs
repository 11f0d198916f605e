//! rolod - natural-language assistant daemon for the rolo contact store.
//!
//! Resolves free-form queries into typed intents (remote LLM with a
//! local statistical fallback) and dispatches them to per-intent
//! handlers over the contact and reminder stores.

use anyhow::Result;
use clap::Parser;
use rolod::config::{RolodConfig, CONFIG_PATH};
use rolod::handlers::HandlerCx;
use rolod::llm::LlmClient;
use rolod::resolver::IntentResolver;
use rolod::server::{self, AppState};
use rolod::store::MemoryStore;
use rolo_core::IntentClassifier;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "rolod")]
#[command(about = "Rolo - natural-language assistant for your contact network", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the config file
    #[arg(long, default_value = CONFIG_PATH)]
    config: PathBuf,

    /// Listen address, overriding the config
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();
    let mut config = RolodConfig::load(&cli.config)?;
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }

    info!("rolod v{} starting", env!("CARGO_PKG_VERSION"));

    // The classifier is trained once here and injected; request
    // handling never touches mutable process-wide state.
    let classifier = IntentClassifier::with_default_corpus();
    let llm = Arc::new(LlmClient::from_config(&config.llm));
    if llm.has_credentials() {
        info!("Remote classification enabled");
    }

    let store = MemoryStore::new();
    let resolver = IntentResolver::new(llm.clone(), classifier);
    let cx = HandlerCx {
        contacts: store.clone(),
        reminders: store,
        llm,
    };

    server::run(AppState::new(resolver, cx), &config.listen_addr).await
}
