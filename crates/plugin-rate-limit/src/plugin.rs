//! Rate limit plugin — registers with the HaikuHub plugin system.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, extract::Request, routing::get};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use haikuhub_core::error::ApiErrorResponse;
use haikuhub_plugin_sdk::prelude::*;

use crate::limiter::RateLimiter;

/// Tunables for the rate limiter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitSettings {
    /// Burst capacity per client.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Tokens refilled per second.
    #[serde(default = "default_refill_per_second")]
    pub refill_per_second: f64,
    /// Seconds between stale-bucket cleanup runs.
    #[serde(default = "default_cleanup_interval_seconds")]
    pub cleanup_interval_seconds: u64,
    /// Seconds a bucket may sit idle before cleanup removes it.
    #[serde(default = "default_max_idle_seconds")]
    pub max_idle_seconds: u64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            refill_per_second: default_refill_per_second(),
            cleanup_interval_seconds: default_cleanup_interval_seconds(),
            max_idle_seconds: default_max_idle_seconds(),
        }
    }
}

fn default_max_tokens() -> u32 {
    60
}

fn default_refill_per_second() -> f64 {
    1.0
}

fn default_cleanup_interval_seconds() -> u64 {
    60
}

fn default_max_idle_seconds() -> u64 {
    300
}

/// Per-client rate limiting plugin.
#[derive(Debug)]
pub struct RateLimitPlugin {
    settings: RateLimitSettings,
    limiter: Arc<RateLimiter>,
}

impl RateLimitPlugin {
    /// Creates the plugin with default settings.
    pub fn new() -> Self {
        Self::with_settings(RateLimitSettings::default())
    }

    /// Creates the plugin with explicit settings.
    pub fn with_settings(settings: RateLimitSettings) -> Self {
        let limiter = Arc::new(RateLimiter::new(
            settings.max_tokens,
            settings.refill_per_second,
        ));
        Self { settings, limiter }
    }

    /// Returns the limiter (used by tests).
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }
}

impl Default for RateLimitPlugin {
    fn default() -> Self {
        Self::new()
    }
}

/// Client key for bucket lookup: first `X-Forwarded-For` entry, falling
/// back to a shared key for direct connections.
fn client_key(request: &Request) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .unwrap_or_else(|| "local".to_string())
}

#[async_trait]
impl Plugin for RateLimitPlugin {
    fn metadata(&self) -> PluginMetadata {
        plugin_metadata!(
            name: "rate-limit",
            version: "1.0.0",
            description: "Per-client token bucket limiting with /api/rate-limit/status",
            author: "HaikuHub Team"
        )
    }

    async fn init(&self, app: &mut AppHandle, plugins: &PluginManager) -> Result<(), AppError> {
        // Stale buckets accumulate one per client key; prune them on an
        // interval for the lifetime of the process.
        let limiter = Arc::clone(&self.limiter);
        let cleanup_interval = Duration::from_secs(self.settings.cleanup_interval_seconds);
        let max_idle = Duration::from_secs(self.settings.max_idle_seconds);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(cleanup_interval);
            interval.tick().await; // first tick fires immediately
            loop {
                interval.tick().await;
                let removed = limiter.prune_stale(max_idle).await;
                if removed > 0 {
                    debug!(removed = removed, "Pruned stale rate limit buckets");
                }
            }
        });

        let limiter = Arc::clone(&self.limiter);
        plugins
            .add_middleware(middleware_fn(move |request, next| {
                let limiter = Arc::clone(&limiter);
                async move {
                    let key = client_key(&request);
                    if limiter.check(&key).await {
                        next.run(request).await
                    } else {
                        warn!(client = %key, path = %request.uri().path(), "Rate limit exceeded");
                        (
                            StatusCode::TOO_MANY_REQUESTS,
                            Json(ApiErrorResponse {
                                error: "RATE_LIMITED".to_string(),
                                message: "too many requests, slow down".to_string(),
                            }),
                        )
                            .into_response()
                    }
                }
            }))
            .await;

        let limiter = Arc::clone(&self.limiter);
        app.merge_routes(Router::new().route(
            "/api/rate-limit/status",
            get(move || {
                let limiter = Arc::clone(&limiter);
                async move {
                    Json(json!({
                        "success": true,
                        "data": {
                            "limit": limiter.max_tokens(),
                            "refill_per_second": limiter.refill_rate(),
                            "active_clients": limiter.bucket_count().await,
                        },
                    }))
                }
            }),
        ));

        Ok(())
    }
}
