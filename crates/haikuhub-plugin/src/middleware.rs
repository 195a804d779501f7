//! Middleware collector — plugins append request middleware here during
//! `init`; the host installs the collected sequence around the complete
//! route set afterwards.

use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use futures::future::BoxFuture;
use tokio::sync::RwLock;
use tracing::debug;

/// A boxed request middleware: receives the request and the rest of the
/// pipeline, returns the response.
pub type MiddlewareFn = Arc<dyn Fn(Request, Next) -> BoxFuture<'static, Response> + Send + Sync>;

/// Wraps an async closure into a [`MiddlewareFn`].
pub fn middleware_fn<F, Fut>(f: F) -> MiddlewareFn
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = Response> + Send + 'static,
{
    Arc::new(move |request, next| Box::pin(f(request, next)))
}

/// Append-only ordered sequence of collected middleware.
///
/// Insertion order is the logical execution order: the host installs the
/// sequence so that earlier-registered middleware sees a request first.
pub struct MiddlewareStack {
    entries: RwLock<Vec<MiddlewareFn>>,
}

impl std::fmt::Debug for MiddlewareStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewareStack").finish_non_exhaustive()
    }
}

impl MiddlewareStack {
    /// Creates a new empty middleware stack.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Appends a middleware function. The function's behavior is not
    /// validated; the host is responsible for invoking it correctly.
    pub async fn add(&self, middleware: MiddlewareFn) {
        let mut entries = self.entries.write().await;
        entries.push(middleware);
        debug!(position = entries.len(), "Middleware collected");
    }

    /// Returns the collected middleware in insertion order.
    pub async fn all(&self) -> Vec<MiddlewareFn> {
        let entries = self.entries.read().await;
        entries.clone()
    }

    /// Returns the number of collected middleware functions.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.len()
    }

    /// Returns whether the stack is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MiddlewareStack {
    fn default() -> Self {
        Self::new()
    }
}
