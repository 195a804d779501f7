//! Haiku API handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::{Value, json};

use haikuhub_core::error::AppError;
use haikuhub_library::Haiku;
use haikuhub_plugin::hooks::names;

use crate::dto::response::{ApiResponse, RandomHaikuResponse};
use crate::state::ApiState;

/// Query parameters for the haiku listing.
#[derive(Debug, Deserialize)]
pub struct HaikuListQuery {
    /// Optional term threaded through the `haikus:filter` hook.
    pub filter: Option<String>,
}

/// GET /api/haikus
///
/// Runs `haikus:filter` when a filter term is given, then `haikus:render`
/// on the (possibly filtered) list.
pub async fn list_haikus(
    State(state): State<ApiState>,
    Query(query): Query<HaikuListQuery>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let mut haikus = serde_json::to_value(state.store.list())?;

    if let Some(filter) = query.filter {
        let payload = json!({ "haikus": haikus, "filter": filter });
        let filtered = state.plugins.run_hook(names::HAIKUS_FILTER, payload).await;
        haikus = filtered
            .get("haikus")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));
    }

    let rendered = state.plugins.run_hook(names::HAIKUS_RENDER, haikus).await;
    Ok(Json(ApiResponse::ok(rendered)))
}

/// GET /api/haikus/random
pub async fn random_haiku(
    State(state): State<ApiState>,
) -> Result<Json<ApiResponse<RandomHaikuResponse>>, AppError> {
    let (index, haiku) = state
        .store
        .random()
        .ok_or_else(|| AppError::not_found("the haiku collection is empty"))?;

    Ok(Json(ApiResponse::ok(RandomHaikuResponse {
        index,
        data: haiku.clone(),
    })))
}

/// GET /api/haikus/{id}
pub async fn get_haiku(
    State(state): State<ApiState>,
    Path(id): Path<usize>,
) -> Result<Json<ApiResponse<Haiku>>, AppError> {
    let haiku = state
        .store
        .get(id)
        .ok_or_else(|| AppError::not_found(format!("haiku {id} does not exist")))?;

    Ok(Json(ApiResponse::ok(haiku.clone())))
}
