//! Haiku API end-to-end tests.

use std::sync::Arc;

use http::StatusCode;
use serde_json::json;

use haikuhub_library::Haiku;
use plugin_word_count::WordCountPlugin;

use crate::helpers::{TestApp, sample_haikus};

#[tokio::test]
async fn test_list_haikus_runs_render_hook() {
    let app = TestApp::with_plugins(sample_haikus(), vec![Arc::new(WordCountPlugin)]).await;

    let (status, body) = app.get_json("/api/haikus").await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 2);
    for item in data {
        assert_eq!(item["word_count"], json!(1));
    }
    assert_eq!(data[0]["text"], json!("one"));
}

#[tokio::test]
async fn test_list_haikus_without_plugins_is_untransformed() {
    let app = TestApp::with_plugins(sample_haikus(), vec![]).await;

    let (status, body) = app.get_json("/api/haikus").await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().expect("data array");
    assert!(data[0].get("word_count").is_none());
}

#[tokio::test]
async fn test_filter_query_runs_filter_hook() {
    let app = TestApp::with_plugins(sample_haikus(), vec![Arc::new(WordCountPlugin)]).await;

    let (status, body) = app.get_json("/api/haikus?filter=one").await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["text"], json!("one"));
    assert_eq!(data[0]["word_count"], json!(1));
}

#[tokio::test]
async fn test_random_haiku_index_always_in_range() {
    let haikus = vec![
        Haiku::new("first winter rain"),
        Haiku::new("an old silent pond"),
        Haiku::new("spring twilight"),
    ];
    let app = TestApp::with_plugins(haikus.clone(), vec![]).await;

    for _ in 0..25 {
        let (status, body) = app.get_json("/api/haikus/random").await;
        assert_eq!(status, StatusCode::OK);

        let index = body["data"]["index"].as_u64().expect("index") as usize;
        assert!(index < haikus.len());
        assert_eq!(body["data"]["data"]["text"], json!(haikus[index].text));
    }
}

#[tokio::test]
async fn test_get_haiku_by_index() {
    let app = TestApp::with_plugins(sample_haikus(), vec![]).await;

    let (status, body) = app.get_json("/api/haikus/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["text"], json!("two"));
}

#[tokio::test]
async fn test_get_haiku_past_end_is_404() {
    let app = TestApp::with_plugins(sample_haikus(), vec![]).await;

    let (status, body) = app.get_json("/api/haikus/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("NOT_FOUND"));
}

#[tokio::test]
async fn test_health_reports_collection_size() {
    let app = TestApp::with_plugins(sample_haikus(), vec![]).await;

    let (status, body) = app.get_json("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("ok"));
    assert_eq!(body["data"]["haikus"], json!(2));
}

#[tokio::test]
async fn test_index_page_renders_haikus_with_word_counts() {
    let app = TestApp::with_plugins(sample_haikus(), vec![Arc::new(WordCountPlugin)]).await;

    let (status, html) = app.get_text("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h1>HaikuHub</h1>"));
    assert!(html.contains("one"));
    assert!(html.contains("1 words"));
}
