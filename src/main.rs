//! Cachet server: hosts the named cache registry.
//!
//! Loads configuration, registers every configured cache, and closes them
//! all on Ctrl-C.

use tracing_subscriber::{EnvFilter, fmt};

use cachet_cache::{CacheRegistry, close_caches};
use cachet_core::config::AppConfig;
use cachet_core::error::CacheError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, CacheError> {
    let config_path =
        std::env::var("CACHET_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    AppConfig::load(&config_path)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Register caches, wait for shutdown, close caches
async fn run(config: AppConfig) -> Result<(), CacheError> {
    tracing::info!("Starting Cachet v{}", env!("CARGO_PKG_VERSION"));

    let registry = CacheRegistry::from_config(&config.caches).await?;
    let names = registry.names().await;
    tracing::info!(caches = ?names, "Caches registered");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| CacheError::internal(format!("Failed to listen for shutdown signal: {e}")))?;

    tracing::info!("Shutting down, closing caches...");
    close_caches(&registry).await?;
    tracing::info!("Shutdown complete");
    Ok(())
}
