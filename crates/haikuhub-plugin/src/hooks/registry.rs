//! Hook registry — callbacks organized into per-name chains.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::callback::HookCallback;

/// Registry of hook callbacks keyed by hook name.
///
/// Chains are append-only and preserve registration order, which defines
/// invocation order. The same callback may be registered more than once
/// and will run once per registration.
#[derive(Debug)]
pub struct HookRegistry {
    /// Hook name → ordered callback chain.
    chains: RwLock<HashMap<String, Vec<Arc<dyn HookCallback>>>>,
}

impl HookRegistry {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self {
            chains: RwLock::new(HashMap::new()),
        }
    }

    /// Appends a callback to the chain for `name`, creating the chain on
    /// first use.
    pub async fn register(&self, name: &str, callback: Arc<dyn HookCallback>) {
        let mut chains = self.chains.write().await;
        let chain = chains.entry(name.to_string()).or_default();
        chain.push(callback.clone());

        debug!(
            hook = %name,
            plugin = %callback.plugin(),
            position = chain.len(),
            "Hook callback registered"
        );
    }

    /// Returns the callback chain for `name` in registration order
    /// (empty if none registered).
    pub async fn callbacks(&self, name: &str) -> Vec<Arc<dyn HookCallback>> {
        let chains = self.chains.read().await;
        chains.get(name).cloned().unwrap_or_default()
    }

    /// Returns whether any callbacks are registered for `name`.
    pub async fn has_callbacks(&self, name: &str) -> bool {
        let chains = self.chains.read().await;
        chains.get(name).map(|c| !c.is_empty()).unwrap_or(false)
    }

    /// Returns the number of callbacks registered for `name`.
    pub async fn callback_count(&self, name: &str) -> usize {
        let chains = self.chains.read().await;
        chains.get(name).map(|c| c.len()).unwrap_or(0)
    }

    /// Returns all hook names with at least one callback.
    pub async fn registered_hooks(&self) -> Vec<String> {
        let chains = self.chains.read().await;
        chains.keys().cloned().collect()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
