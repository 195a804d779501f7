//! Application builder — wires host routes, plugin route fragments, and
//! collected middleware into an Axum app.

use std::sync::Arc;

use axum::Router;
use axum::extract::Request;
use axum::middleware::Next;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use haikuhub_plugin::app_handle::AppHandle;

use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::ApiState;

/// Builds the complete Axum application.
///
/// Merges the host routes with the plugin route fragments accumulated in
/// `handle`, then wraps the full route set with the middleware collected by
/// plugins. The two-phase install means collected middleware sees every
/// route, including routes contributed by later-initializing plugins.
pub async fn build_app(state: ApiState, handle: AppHandle) -> Router {
    let plugins = Arc::clone(&state.plugins);

    let mut app = build_router(state)
        .merge(handle.into_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    // `Router::layer` wraps outside-in as layers are added, so the
    // collected sequence is applied in reverse: the first-registered
    // middleware ends up outermost and sees requests first.
    for middleware in plugins.middleware().all().await.into_iter().rev() {
        app = app.layer(axum::middleware::from_fn(
            move |request: Request, next: Next| {
                let middleware = Arc::clone(&middleware);
                async move { middleware(request, next).await }
            },
        ));
    }

    app.layer(axum::middleware::from_fn(request_logging))
}
