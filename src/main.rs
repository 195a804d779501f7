//! HaikuHub Server — haiku collection web app with a plugin framework.
//!
//! Main entry point that wires all crates together and starts the server.

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use haikuhub_core::config::HaikuhubConfig;
use haikuhub_core::error::AppError;
use haikuhub_library::HaikuStore;
use haikuhub_plugin::app_handle::AppHandle;
use haikuhub_plugin::hooks::names;
use haikuhub_plugin::loader::PluginLoader;
use haikuhub_plugin::manager::PluginManager;

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
fn load_configuration() -> Result<HaikuhubConfig, AppError> {
    let env = std::env::var("HAIKUHUB_ENV").unwrap_or_else(|_| "development".to_string());
    HaikuhubConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &HaikuhubConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).init();
        }
    }
}

/// Main server run function
async fn run(config: HaikuhubConfig) -> Result<(), AppError> {
    tracing::info!("Starting HaikuHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Load the haiku collection ────────────────────────
    let store = Arc::new(HaikuStore::load(Path::new(&config.library.data_file))?);

    // ── Step 2: Register compiled-in plugins ─────────────────────
    let plugins = Arc::new(PluginManager::new());
    plugins
        .registry()
        .register(Arc::new(plugin_analytics::AnalyticsPlugin::new()))
        .await?;
    plugins
        .registry()
        .register(Arc::new(plugin_rate_limit::RateLimitPlugin::new()))
        .await?;
    plugins
        .registry()
        .register(Arc::new(plugin_word_count::WordCountPlugin))
        .await?;

    // ── Step 3: Load plugins from the plugin directory ───────────
    // The loader must outlive the server: dropping it unloads the
    // libraries behind any dynamically loaded plugins.
    let mut loader = PluginLoader::new(Arc::clone(plugins.registry()));
    if config.plugins.auto_load {
        // Safety: plugin libraries are trusted code.
        let loaded = unsafe {
            loader
                .load_from_directory(Path::new(&config.plugins.directory))
                .await
        };
        tracing::info!(loaded = loaded, "Plugin directory scan complete");
    }

    // ── Step 4: Initialize plugins ───────────────────────────────
    let mut app_handle = AppHandle::new();
    plugins.init_all(&mut app_handle).await?;

    // ── Step 5: Build the application ────────────────────────────
    let templates = Arc::new(haikuhub_api::templates::build_templates()?);
    let state = haikuhub_api::state::ApiState {
        config: Arc::new(config.clone()),
        store,
        plugins: Arc::clone(&plugins),
        templates,
    };
    let app = haikuhub_api::app::build_app(state, app_handle).await;

    // ── Step 6: Start the HTTP server ────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("HaikuHub listening on {}", addr);

    plugins
        .run_hook(
            names::APP_START,
            serde_json::json!({ "port": config.server.port }),
        )
        .await;

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());
    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    drop(loader);
    tracing::info!("HaikuHub shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
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
