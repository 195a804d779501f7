//! Application state shared across all handlers.

use std::sync::Arc;

use tera::Tera;

use haikuhub_core::config::HaikuhubConfig;
use haikuhub_library::HaikuStore;
use haikuhub_plugin::manager::PluginManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<ApiState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct ApiState {
    /// Application configuration.
    pub config: Arc<HaikuhubConfig>,
    /// The haiku collection.
    pub store: Arc<HaikuStore>,
    /// Plugin manager (registry, hooks, middleware).
    pub plugins: Arc<PluginManager>,
    /// Compiled page templates.
    pub templates: Arc<Tera>,
}
