pub mod favorites;
pub mod stats;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ServerError;
use crate::state::AppState;

/// Build the Axum router with the favorites proxy routes, CORS, and tracing middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let user_routes = Router::new()
        .route("/:user_id/favoritos", get(favorites::list_favorites))
        .route(
            "/:user_id/favoritos/:movie_id",
            axum::routing::post(favorites::add_favorite).delete(favorites::remove_favorite),
        )
        .route("/:user_id/estadisticas", get(stats::user_stats));

    let favorite_routes = Router::new()
        .route("/verificar/:user_id/:movie_id", get(favorites::verify_favorite));

    Router::new()
        .nest("/api/usuarios", user_routes)
        .nest("/api/favoritos", favorite_routes)
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Simple health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

/// Parse a numeric path segment before anything is sent upstream.
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<i64, ServerError> {
    raw.parse::<i64>()
        .map_err(|e| ServerError::BadRequest(format!("invalid {what} {raw:?}: {e}")))
}
