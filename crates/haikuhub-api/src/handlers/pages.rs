//! HTML page handlers.

use axum::extract::State;
use axum::response::Html;

use haikuhub_core::error::AppError;
use haikuhub_plugin::hooks::names;

use crate::state::ApiState;

/// GET /
///
/// Renders the haiku page after threading the list through the
/// `haikus:render` hook.
pub async fn index(State(state): State<ApiState>) -> Result<Html<String>, AppError> {
    let haikus = serde_json::to_value(state.store.list())?;
    let rendered = state.plugins.run_hook(names::HAIKUS_RENDER, haikus).await;

    let mut context = tera::Context::new();
    context.insert("haikus", &rendered);
    context.insert("count", &state.store.len());

    let html = state
        .templates
        .render("index.html", &context)
        .map_err(|e| AppError::internal(format!("template render failed: {e}")))?;

    Ok(Html(html))
}
