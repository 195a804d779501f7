//! Plugin system end-to-end tests.

use std::sync::Arc;

use http::StatusCode;
use serde_json::json;

use haikuhub_plugin::app_handle::AppHandle;
use haikuhub_plugin::hooks::names;
use haikuhub_plugin::registry::Plugin;
use plugin_analytics::AnalyticsPlugin;
use plugin_rate_limit::{RateLimitPlugin, RateLimitSettings};
use plugin_word_count::WordCountPlugin;

use crate::helpers::{TestApp, sample_haikus};

fn full_plugin_set() -> Vec<Arc<dyn Plugin>> {
    vec![
        Arc::new(AnalyticsPlugin::new()),
        Arc::new(RateLimitPlugin::new()),
        Arc::new(WordCountPlugin),
    ]
}

#[tokio::test]
async fn test_plugins_endpoint_lists_registration_order() {
    let app = TestApp::with_plugins(sample_haikus(), full_plugin_set()).await;

    let (status, body) = app.get_json("/api/plugins").await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["analytics", "rate-limit", "word-count"]);
}

#[tokio::test]
async fn test_disabled_plugin_contributes_no_routes() {
    let app = TestApp::with_disabled(sample_haikus(), full_plugin_set(), &["analytics"]).await;

    let (status, _) = app.get_json("/api/analytics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Still listed, just disabled.
    let (_, body) = app.get_json("/api/plugins").await;
    let analytics = &body["data"][0];
    assert_eq!(analytics["name"], json!("analytics"));
    assert_eq!(analytics["enabled"], json!(false));
}

#[tokio::test]
async fn test_disable_after_init_has_no_retroactive_effect() {
    let app = TestApp::with_plugins(sample_haikus(), full_plugin_set()).await;

    app.plugins.registry().disable("analytics").await.unwrap();

    let (status, _) = app.get_json("/api/analytics").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_analytics_counts_requests_through_middleware() {
    let app =
        TestApp::with_plugins(sample_haikus(), vec![Arc::new(AnalyticsPlugin::new())]).await;

    app.get_json("/api/haikus").await;
    app.get_json("/api/haikus").await;

    let (status, body) = app.get_json("/api/analytics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["routes"]["/api/haikus"], json!(2));
    // The analytics request itself is counted too.
    assert_eq!(body["data"]["total_requests"], json!(3));
}

#[tokio::test]
async fn test_rate_limit_blocks_after_burst() {
    let settings = RateLimitSettings {
        max_tokens: 2,
        refill_per_second: 0.0001,
        ..RateLimitSettings::default()
    };
    let app = TestApp::with_plugins(
        sample_haikus(),
        vec![Arc::new(RateLimitPlugin::with_settings(settings))],
    )
    .await;

    let (first, _) = app.get_json("/api/haikus").await;
    let (second, _) = app.get_json("/api/haikus").await;
    let (third, body) = app.get_json("/api/haikus").await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(third, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], json!("RATE_LIMITED"));
}

#[tokio::test]
async fn test_rate_limit_status_endpoint() {
    let app = TestApp::with_plugins(sample_haikus(), vec![Arc::new(RateLimitPlugin::new())]).await;

    let (status, body) = app.get_json("/api/rate-limit/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["limit"], json!(60));
    assert_eq!(body["data"]["active_clients"], json!(1));
}

#[tokio::test]
async fn test_second_init_all_adds_nothing() {
    let app = TestApp::with_plugins(sample_haikus(), full_plugin_set()).await;

    let mut extra_handle = AppHandle::new();
    app.plugins.init_all(&mut extra_handle).await.unwrap();

    // No routes accumulated by the ignored second pass, and hook chains
    // did not grow.
    assert_eq!(extra_handle.route_sets(), 0);
    assert_eq!(
        app.plugins.hooks().callback_count(names::HAIKUS_RENDER).await,
        1
    );

    let (status, _) = app.get_json("/api/analytics").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_app_start_hook_observers_run() {
    let app = TestApp::with_plugins(sample_haikus(), full_plugin_set()).await;

    // The analytics plugin registered an app:start observer; running the
    // chain returns the payload unchanged.
    let payload = json!({ "port": 3000 });
    let out = app.plugins.run_hook(names::APP_START, payload.clone()).await;
    assert_eq!(out, payload);
}
