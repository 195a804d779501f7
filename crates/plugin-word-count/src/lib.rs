//! # plugin-word-count
//!
//! Annotates every haiku with a `word_count` field on `haikus:render` and
//! answers `haikus:filter` with case-insensitive substring matching on the
//! haiku text.

use serde_json::{Value, json};

use haikuhub_plugin_sdk::prelude::*;

/// Haiku metadata plugin.
#[derive(Debug, Default)]
pub struct WordCountPlugin;

/// Adds `word_count` to every object in a haiku array. Non-array data is
/// left untouched.
fn annotate_word_counts(data: &Value) -> Option<Value> {
    let items = data.as_array()?;
    let annotated = items
        .iter()
        .map(|item| {
            let mut item = item.clone();
            if let Some(record) = item.as_object_mut() {
                let words = record
                    .get("text")
                    .and_then(Value::as_str)
                    .map(|text| text.split_whitespace().count())
                    .unwrap_or(0);
                record.insert("word_count".to_string(), json!(words));
            }
            item
        })
        .collect();
    Some(Value::Array(annotated))
}

/// Keeps haikus whose text contains the filter term, case-insensitively.
/// Malformed payloads pass through untouched.
fn filter_haikus(data: &Value) -> Option<Value> {
    let term = data.get("filter")?.as_str()?.to_lowercase();
    let haikus = data.get("haikus")?.as_array()?;

    let kept: Vec<Value> = haikus
        .iter()
        .filter(|haiku| {
            haiku
                .get("text")
                .and_then(Value::as_str)
                .is_some_and(|text| text.to_lowercase().contains(&term))
        })
        .cloned()
        .collect();

    Some(json!({ "haikus": kept, "filter": data.get("filter")? }))
}

#[async_trait]
impl Plugin for WordCountPlugin {
    fn metadata(&self) -> PluginMetadata {
        plugin_metadata!(
            name: "word-count",
            version: "1.0.0",
            description: "Word counts on haikus:render, substring matching on haikus:filter",
            author: "HaikuHub Team"
        )
    }

    async fn init(&self, _app: &mut AppHandle, plugins: &PluginManager) -> Result<(), AppError> {
        plugins
            .register_hook(
                names::HAIKUS_RENDER,
                ClosureCallback::wrap("word-count", |data| {
                    let out = annotate_word_counts(data);
                    async move { Ok(out) }
                }),
            )
            .await;

        plugins
            .register_hook(
                names::HAIKUS_FILTER,
                ClosureCallback::wrap("word-count", |data| {
                    let out = filter_haikus(data);
                    async move { Ok(out) }
                }),
            )
            .await;

        Ok(())
    }
}

// Entry point for the dynamic loader when built as a cdylib.
declare_plugin!(WordCountPlugin);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_adds_word_count_per_record() {
        let data = json!([{"text": "one"}, {"text": "two"}]);
        let out = annotate_word_counts(&data).expect("array in, array out");
        assert_eq!(out[0]["word_count"], json!(1));
        assert_eq!(out[1]["word_count"], json!(1));
        assert_eq!(out[0]["text"], json!("one"));
    }

    #[test]
    fn test_annotate_counts_whitespace_separated_words() {
        let data = json!([{"text": "an old silent pond\na frog jumps in"}]);
        let out = annotate_word_counts(&data).expect("annotated");
        assert_eq!(out[0]["word_count"], json!(8));
    }

    #[test]
    fn test_annotate_leaves_non_array_untouched() {
        assert!(annotate_word_counts(&json!({"text": "not a list"})).is_none());
    }

    #[test]
    fn test_filter_keeps_matching_haikus() {
        let data = json!({
            "haikus": [{"text": "an old silent Pond"}, {"text": "winter rain"}],
            "filter": "pond",
        });
        let out = filter_haikus(&data).expect("filtered");
        let kept = out["haikus"].as_array().unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0]["text"], json!("an old silent Pond"));
        assert_eq!(out["filter"], json!("pond"));
    }

    #[test]
    fn test_filter_malformed_payload_passes_through() {
        assert!(filter_haikus(&json!({"haikus": []})).is_none());
        assert!(filter_haikus(&json!("nonsense")).is_none());
    }

    #[tokio::test]
    async fn test_init_registers_both_hooks() {
        let manager = PluginManager::new();
        manager
            .registry()
            .register(std::sync::Arc::new(WordCountPlugin))
            .await
            .unwrap();

        let mut app = AppHandle::new();
        manager.init_all(&mut app).await.unwrap();

        assert_eq!(manager.hooks().callback_count(names::HAIKUS_RENDER).await, 1);
        assert_eq!(manager.hooks().callback_count(names::HAIKUS_FILTER).await, 1);

        let rendered = manager
            .run_hook(names::HAIKUS_RENDER, json!([{"text": "one"}, {"text": "two"}]))
            .await;
        assert_eq!(rendered[0]["word_count"], json!(1));
        assert_eq!(rendered[1]["word_count"], json!(1));
    }
}
