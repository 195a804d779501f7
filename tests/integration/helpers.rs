//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use haikuhub_api::state::ApiState;
use haikuhub_core::config::HaikuhubConfig;
use haikuhub_library::{Haiku, HaikuStore};
use haikuhub_plugin::app_handle::AppHandle;
use haikuhub_plugin::manager::PluginManager;
use haikuhub_plugin::registry::Plugin;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The plugin manager behind the router
    pub plugins: Arc<PluginManager>,
}

/// Two single-word haikus used by the hook transformation tests.
pub fn sample_haikus() -> Vec<Haiku> {
    vec![Haiku::new("one"), Haiku::new("two")]
}

impl TestApp {
    /// Builds an app over `haikus` with the given plugins, running the full
    /// startup sequence: register, `init_all`, assemble.
    pub async fn with_plugins(haikus: Vec<Haiku>, plugins: Vec<Arc<dyn Plugin>>) -> Self {
        Self::build(haikus, plugins, &[]).await
    }

    /// Same as [`TestApp::with_plugins`], disabling the named plugins
    /// before `init_all` runs.
    pub async fn with_disabled(
        haikus: Vec<Haiku>,
        plugins: Vec<Arc<dyn Plugin>>,
        disabled: &[&str],
    ) -> Self {
        Self::build(haikus, plugins, disabled).await
    }

    async fn build(haikus: Vec<Haiku>, plugins: Vec<Arc<dyn Plugin>>, disabled: &[&str]) -> Self {
        let manager = Arc::new(PluginManager::new());
        for plugin in plugins {
            manager
                .registry()
                .register(plugin)
                .await
                .expect("Failed to register plugin");
        }
        for name in disabled {
            manager
                .registry()
                .disable(name)
                .await
                .expect("Failed to disable plugin");
        }

        let mut handle = AppHandle::new();
        manager
            .init_all(&mut handle)
            .await
            .expect("Failed to initialize plugins");

        let state = ApiState {
            config: Arc::new(HaikuhubConfig::default()),
            store: Arc::new(HaikuStore::from_haikus(haikus)),
            plugins: Arc::clone(&manager),
            templates: Arc::new(
                haikuhub_api::templates::build_templates().expect("Failed to build templates"),
            ),
        };

        let router = haikuhub_api::app::build_app(state, handle).await;

        Self {
            router,
            plugins: manager,
        }
    }

    /// Sends a GET request and returns the status with the parsed JSON body.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("Failed to build request"),
            )
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    /// Sends a GET request and returns the status with the body as text.
    pub async fn get_text(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("Failed to build request"),
            )
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }
}
