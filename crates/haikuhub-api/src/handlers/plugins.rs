//! Plugin listing handler.

use axum::Json;
use axum::extract::State;

use haikuhub_plugin::registry::PluginEntry;

use crate::dto::response::ApiResponse;
use crate::state::ApiState;

/// GET /api/plugins
///
/// Serializes the registry listing in registration order.
pub async fn list_plugins(State(state): State<ApiState>) -> Json<ApiResponse<Vec<PluginEntry>>> {
    Json(ApiResponse::ok(state.plugins.registry().list().await))
}
