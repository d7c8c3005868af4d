use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use activator_core::{
    load_config, load_config_from_env, validate_config, ActivationProcessor, CommercePlatform,
    Config, SanitizedConfig, ShopifyClient,
};
use activator_server::api::create_router;
use activator_server::state::AppState;

/// Config file used when `ACTIVATOR_CONFIG` is not set.
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    let json = std::env::var("ACTIVATOR_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// File named by `ACTIVATOR_CONFIG`, else `config.toml` if present, else env only.
fn resolve_config() -> Result<Config> {
    match std::env::var("ACTIVATOR_CONFIG") {
        Ok(path) => {
            let path = PathBuf::from(path);
            info!("Loading configuration from {:?}", path);
            load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
        }
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            info!("Loading configuration from {}", DEFAULT_CONFIG_PATH);
            load_config(Path::new(DEFAULT_CONFIG_PATH))
                .with_context(|| format!("Failed to load config from {}", DEFAULT_CONFIG_PATH))
        }
        Err(_) => {
            info!("No config file, loading configuration from environment");
            load_config_from_env().context("Failed to load config from environment")
        }
    }
}

async fn run() -> Result<()> {
    init_logging();

    let config = resolve_config()?;
    validate_config(&config).context("Configuration validation failed")?;

    let sanitized = serde_json::to_string(&SanitizedConfig::from(&config))
        .context("Failed to serialize configuration")?;
    info!(config = %sanitized, "Configuration loaded successfully");

    let shopify = ShopifyClient::new(&config.shopify).context("Failed to create Shopify client")?;
    info!(endpoint = shopify.endpoint(), "Shopify client initialized");
    let platform: Arc<dyn CommercePlatform> = Arc::new(shopify);

    let processor = Arc::new(ActivationProcessor::new(
        config.activation.clone(),
        platform,
    ));
    info!(
        target_product_id = %config.activation.target_product_id,
        max_attempts = config.activation.lookup_max_attempts,
        retry_delay_secs = config.activation.lookup_retry_delay_secs,
        "Activation processor ready"
    );

    let state = Arc::new(AppState::new(config.server.clone(), processor));
    let app = create_router(state);

    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!(
        "Starting server on {} (webhook path {})",
        addr, config.server.webhook_path
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // In-flight detached tasks are not awaited; they stop with the runtime.
    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
