//! Plugin manager — owns the registries and orchestrates initialization.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use tracing::{debug, error, info, warn};

use haikuhub_core::error::AppError;

use crate::app_handle::AppHandle;
use crate::error::PluginError;
use crate::hooks::callback::HookCallback;
use crate::hooks::names;
use crate::hooks::registry::HookRegistry;
use crate::hooks::runner::HookRunner;
use crate::middleware::{MiddlewareFn, MiddlewareStack};
use crate::registry::PluginRegistry;

/// Owns the plugin registry, hook registry, and middleware stack, and runs
/// the one-shot initialization pass over all enabled plugins.
#[derive(Debug)]
pub struct PluginManager {
    /// Plugin registry.
    registry: Arc<PluginRegistry>,
    /// Hook registry.
    hooks: Arc<HookRegistry>,
    /// Hook runner bound to `hooks`.
    runner: HookRunner,
    /// Collected middleware.
    middleware: Arc<MiddlewareStack>,
    /// Set once `init_all` completed successfully.
    initialized: AtomicBool,
}

impl PluginManager {
    /// Creates a new plugin manager.
    pub fn new() -> Self {
        let hooks = Arc::new(HookRegistry::new());
        let runner = HookRunner::new(Arc::clone(&hooks));

        Self {
            registry: Arc::new(PluginRegistry::new()),
            hooks,
            runner,
            middleware: Arc::new(MiddlewareStack::new()),
            initialized: AtomicBool::new(false),
        }
    }

    /// Initializes every enabled plugin in registration order.
    ///
    /// Disabled plugins are skipped (logged). A failing `init` is logged
    /// and propagated, aborting the remaining initializations — a broken
    /// plugin is fatal to startup, unlike a failing hook callback.
    ///
    /// A second call is a logged no-op: routes, hooks, and middleware are
    /// applied at most once. After the pass, the `plugins:initialized`
    /// hook is run with `{"plugins": [names]}`.
    pub async fn init_all(&self, app: &mut AppHandle) -> Result<(), AppError> {
        if self.initialized.load(Ordering::SeqCst) {
            warn!("Plugin initialization requested twice, ignoring");
            return Ok(());
        }

        let records = self.registry.snapshot().await;
        for (name, enabled, plugin) in &records {
            if !enabled {
                info!(plugin = %name, "Plugin disabled, skipping init");
                continue;
            }

            debug!(plugin = %name, "Initializing plugin");
            if let Err(e) = plugin.init(app, self).await {
                error!(plugin = %name, error = %e, "Plugin initialization failed");
                return Err(PluginError::Init {
                    name: name.clone(),
                    source: e,
                }
                .into());
            }
        }

        self.initialized.store(true, Ordering::SeqCst);
        info!(plugins = records.len(), "All plugins initialized");

        let plugin_names: Vec<&str> = records.iter().map(|(name, _, _)| name.as_str()).collect();
        self.run_hook(
            names::PLUGINS_INITIALIZED,
            serde_json::json!({ "plugins": plugin_names }),
        )
        .await;

        Ok(())
    }

    /// Whether `init_all` has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Returns the plugin registry.
    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    /// Returns the hook registry.
    pub fn hooks(&self) -> &Arc<HookRegistry> {
        &self.hooks
    }

    /// Returns the middleware stack.
    pub fn middleware(&self) -> &Arc<MiddlewareStack> {
        &self.middleware
    }

    /// Appends a callback to the named hook chain.
    pub async fn register_hook(&self, name: &str, callback: Arc<dyn HookCallback>) {
        self.hooks.register(name, callback).await;
    }

    /// Runs the named hook chain, threading `data` through it.
    pub async fn run_hook(&self, name: &str, data: Value) -> Value {
        self.runner.run(name, data).await
    }

    /// Appends a middleware function to the collected stack.
    pub async fn add_middleware(&self, middleware: MiddlewareFn) {
        self.middleware.add(middleware).await;
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}
