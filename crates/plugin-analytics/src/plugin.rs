//! Analytics plugin — registers with the HaikuHub plugin system.

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use serde_json::json;
use tracing::info;

use haikuhub_plugin_sdk::prelude::*;

use crate::stats::AnalyticsStats;

/// Request analytics plugin.
#[derive(Debug, Default)]
pub struct AnalyticsPlugin {
    /// Counters owned by this instance, injected into the middleware and
    /// route closures.
    stats: Arc<AnalyticsStats>,
}

impl AnalyticsPlugin {
    /// Creates a new analytics plugin with fresh counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the counters (used by tests).
    pub fn stats(&self) -> &Arc<AnalyticsStats> {
        &self.stats
    }
}

#[async_trait]
impl Plugin for AnalyticsPlugin {
    fn metadata(&self) -> PluginMetadata {
        plugin_metadata!(
            name: "analytics",
            version: "1.0.0",
            description: "Per-route request counters served on /api/analytics",
            author: "HaikuHub Team"
        )
    }

    async fn init(&self, app: &mut AppHandle, plugins: &PluginManager) -> Result<(), AppError> {
        let stats = Arc::clone(&self.stats);
        plugins
            .add_middleware(middleware_fn(move |request, next| {
                let stats = Arc::clone(&stats);
                async move {
                    stats.record(request.uri().path());
                    next.run(request).await
                }
            }))
            .await;

        let stats = Arc::clone(&self.stats);
        app.merge_routes(Router::new().route(
            "/api/analytics",
            get(move || {
                let stats = Arc::clone(&stats);
                async move { Json(json!({ "success": true, "data": stats.snapshot() })) }
            }),
        ));

        plugins
            .register_hook(
                names::APP_START,
                ClosureCallback::wrap("analytics", |data| {
                    let port = data.get("port").cloned();
                    async move {
                        info!(port = ?port, "Analytics counting requests");
                        Ok(None)
                    }
                }),
            )
            .await;

        Ok(())
    }
}
