use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use reqwest::Method;

use cinefav_core::constants::user_stats_path;

use crate::api::parse_id;
use crate::error::{Result, ServerError};
use crate::state::AppState;

/// GET /api/usuarios/{id}/estadisticas
pub async fn user_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let user_id = parse_id(&id, "user id")?;

    let stats = state
        .upstream
        .send_json(Method::GET, &user_stats_path(user_id))
        .await
        .map_err(|e| {
            ServerError::from_upstream(e, Some("User not found"), "Failed to fetch user statistics")
        })?;

    Ok(Json(stats))
}
