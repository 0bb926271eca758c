/// Movie identifier as issued by the upstream catalog.
pub type MovieId = i64;

/// User identifier as issued by the upstream catalog.
pub type UserId = i64;

/// Default upstream catalog API the proxy forwards to.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Default port the proxy listens on.
pub const DEFAULT_PROXY_PORT: u16 = 5000;

/// Default timeout in seconds for a single upstream request.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Default timeout in seconds for a CLI request to the proxy. Longer than the
/// proxy's own upstream timeout so the proxy's error answer gets through.
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 30;

/// `GET` list / prefix for `POST`/`DELETE` of a user's favorites.
pub fn user_favorites_path(user_id: UserId) -> String {
    format!("/api/usuarios/{user_id}/favoritos")
}

/// `POST` adds, `DELETE` removes a single favorite.
pub fn user_favorite_path(user_id: UserId, movie_id: MovieId) -> String {
    format!("/api/usuarios/{user_id}/favoritos/{movie_id}")
}

pub fn verify_favorite_path(user_id: UserId, movie_id: MovieId) -> String {
    format!("/api/favoritos/verificar/{user_id}/{movie_id}")
}

pub fn user_stats_path(user_id: UserId) -> String {
    format!("/api/usuarios/{user_id}/estadisticas")
}
