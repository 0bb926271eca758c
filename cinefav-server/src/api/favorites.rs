use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use reqwest::Method;

use cinefav_core::constants::{user_favorite_path, user_favorites_path, verify_favorite_path};

use crate::api::parse_id;
use crate::error::{Result, ServerError};
use crate::state::AppState;

/// GET /api/usuarios/{id}/favoritos
///
/// Forwards the user's favorite movies as returned upstream.
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let user_id = parse_id(&id, "user id")?;

    let movies = state
        .upstream
        .send_json(Method::GET, &user_favorites_path(user_id))
        .await
        .map_err(|e| {
            ServerError::from_upstream(e, Some("User not found"), "Failed to fetch user favorites")
        })?;

    tracing::debug!(user_id, "favorites listed");

    Ok(Json(movies))
}

/// POST /api/usuarios/{user_id}/favoritos/{pelicula_id}
///
/// Returns 201 with the favorite record created upstream.
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Path((user, movie)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let user_id = parse_id(&user, "user id")?;
    let movie_id = parse_id(&movie, "movie id")?;

    let record = state
        .upstream
        .send_json(Method::POST, &user_favorite_path(user_id, movie_id))
        .await
        .map_err(|e| {
            ServerError::from_upstream(e, Some("User or movie not found"), "Failed to add favorite")
        })?;

    tracing::info!(user_id, movie_id, "favorite added");

    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/usuarios/{user_id}/favoritos/{pelicula_id}
///
/// Returns 204 with an empty body.
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Path((user, movie)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let user_id = parse_id(&user, "user id")?;
    let movie_id = parse_id(&movie, "movie id")?;

    state
        .upstream
        .send(Method::DELETE, &user_favorite_path(user_id, movie_id))
        .await
        .map_err(|e| {
            ServerError::from_upstream(e, Some("Favorite not found"), "Failed to remove favorite")
        })?;

    tracing::info!(user_id, movie_id, "favorite removed");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/favoritos/verificar/{user_id}/{pelicula_id}
pub async fn verify_favorite(
    State(state): State<Arc<AppState>>,
    Path((user, movie)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let user_id = parse_id(&user, "user id")?;
    let movie_id = parse_id(&movie, "movie id")?;

    let check = state
        .upstream
        .send_json(Method::GET, &verify_favorite_path(user_id, movie_id))
        .await
        .map_err(|e| ServerError::from_upstream(e, None, "Failed to verify favorite"))?;

    Ok(Json(check))
}
