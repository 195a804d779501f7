//! Hook callback trait and closure adapter.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use haikuhub_core::error::AppError;

/// Trait for hook callback implementations.
#[async_trait]
pub trait HookCallback: Send + Sync + std::fmt::Debug {
    /// Invoked with the current chain value.
    ///
    /// `Ok(Some(v))` replaces the value for the rest of the chain;
    /// `Ok(None)` leaves it unchanged. An `Err` is logged by the runner and
    /// treated like `Ok(None)`.
    async fn call(&self, data: &Value) -> Result<Option<Value>, AppError>;

    /// Name of the plugin that registered this callback, for diagnostics.
    fn plugin(&self) -> &str;
}

/// A closure-based hook callback for quick callback creation.
pub struct ClosureCallback {
    /// Owning plugin name.
    plugin: String,
    /// Callback function.
    handler: Arc<
        dyn Fn(
                &Value,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = Result<Option<Value>, AppError>> + Send + '_>,
            > + Send
            + Sync,
    >,
}

impl std::fmt::Debug for ClosureCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureCallback")
            .field("plugin", &self.plugin)
            .field("handler", &"<closure>")
            .finish()
    }
}

impl ClosureCallback {
    /// Creates a new closure-based callback.
    pub fn new<F, Fut>(plugin: &str, handler: F) -> Self
    where
        F: Fn(&Value) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<Option<Value>, AppError>> + Send + 'static,
    {
        Self {
            plugin: plugin.to_string(),
            handler: Arc::new(move |data| {
                let fut = handler(data);
                Box::pin(fut)
            }),
        }
    }

    /// Wraps a closure directly into an `Arc<dyn HookCallback>`.
    pub fn wrap<F, Fut>(plugin: &str, handler: F) -> Arc<dyn HookCallback>
    where
        F: Fn(&Value) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<Option<Value>, AppError>> + Send + 'static,
    {
        Arc::new(Self::new(plugin, handler))
    }
}

#[async_trait]
impl HookCallback for ClosureCallback {
    async fn call(&self, data: &Value) -> Result<Option<Value>, AppError> {
        (self.handler)(data).await
    }

    fn plugin(&self) -> &str {
        &self.plugin
    }
}
