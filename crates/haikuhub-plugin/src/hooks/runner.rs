//! Hook runner — threads a value through a callback chain.
//!
//! Semantics per chain step:
//! - `Ok(Some(v))` — `v` becomes the input of the next callback.
//! - `Ok(None)` — the previous value is retained unchanged.
//! - `Err(_)` — logged and treated like `Ok(None)`; the chain continues.
//!
//! A run therefore always completes and always yields a value.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error};

use super::registry::HookRegistry;

/// Runs hook chains against the registry.
#[derive(Debug)]
pub struct HookRunner {
    /// Hook registry.
    registry: Arc<HookRegistry>,
}

impl HookRunner {
    /// Creates a new hook runner.
    pub fn new(registry: Arc<HookRegistry>) -> Self {
        Self { registry }
    }

    /// Runs the chain for `name`, threading `data` through each callback in
    /// registration order, and returns the final value.
    ///
    /// With no registered callbacks, `data` is returned unchanged. Each
    /// callback is awaited to completion before the next starts.
    pub async fn run(&self, name: &str, data: Value) -> Value {
        let callbacks = self.registry.callbacks(name).await;
        if callbacks.is_empty() {
            return data;
        }

        debug!(hook = %name, callbacks = callbacks.len(), "Running hook");

        let mut current = data;
        for callback in &callbacks {
            match callback.call(&current).await {
                Ok(Some(next)) => current = next,
                Ok(None) => {}
                Err(e) => {
                    error!(
                        hook = %name,
                        plugin = %callback.plugin(),
                        error = %e,
                        "Hook callback failed, continuing with previous value"
                    );
                }
            }
        }

        current
    }

    /// Returns a reference to the hook registry.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }
}
