//! TruthSeed gateway - verse retrieval over HTTP

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use truthseed_gateway::{
    config::Args,
    server::{self, AppState},
};
use truthseed_verse::{PrefsStore, TruthCatalog, VerseCache, VerseService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing/logging
    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("truthseed_gateway={0},truthseed_verse={0},info", log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Validate configuration
    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // Load and validate the truth catalog; refuse to start on violations
    let catalog = match &args.content_path {
        Some(path) => TruthCatalog::load_path(path),
        None => TruthCatalog::load_default(),
    };
    let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Content validation failed:");
            for violation in e.violations() {
                error!("  - {}", violation);
            }
            if e.violations().is_empty() {
                error!("  {}", e);
            }
            std::process::exit(1);
        }
    };

    // Print startup banner
    info!("======================================");
    info!("  TruthSeed Gateway");
    info!("======================================");
    info!("Node ID: {}", args.node_id);
    info!("Listen: {}", args.listen);
    info!(
        "Verse API: {}",
        args.verse_api_url.as_deref().unwrap_or("(mock provider)")
    );
    info!("Default translation: {}", args.default_translation);
    info!(
        "Data dir: {}",
        args.data_dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "(memory only)".to_string())
    );
    info!(
        "Catalog: {} truths, {} references",
        catalog.len(),
        catalog.reference_count()
    );
    info!("======================================");

    // Stores: persistent under the data dir, memory-only without one
    let cache = match args.cache_path() {
        Some(path) => Arc::new(VerseCache::open(path)),
        None => Arc::new(VerseCache::memory()),
    };
    let prefs = match args.prefs_path() {
        Some(path) => PrefsStore::open(path),
        None => PrefsStore::memory(),
    };

    let service = VerseService::from_config(&args.provider_config(), cache);
    info!("Verse provider: {}", service.provider_name());

    let state = Arc::new(AppState::new(args, catalog, service, prefs));
    server::run(state).await
}
