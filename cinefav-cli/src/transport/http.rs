use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use tracing::debug;

use cinefav_core::constants::{
    user_favorite_path, user_favorites_path, user_stats_path, verify_favorite_path, MovieId,
    UserId, DEFAULT_CLIENT_TIMEOUT_SECS,
};
use cinefav_core::error::CinefavError;
use cinefav_core::models::serialization::from_json;
use cinefav_core::models::{FavoriteCheck, FavoriteRecord, Movie, UserStats};
use cinefav_core::traits::remote::FavoritesRemote;

/// HTTP transport talking to the cinefav proxy (or directly to the upstream API,
/// which serves the same paths).
pub struct HttpRemote {
    client: Client,
    base_url: String,
}

impl HttpRemote {
    pub fn new(base_url: &str) -> Result<Self, CinefavError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_CLIENT_TIMEOUT_SECS))
            .build()
            .map_err(|e| CinefavError::Transport(format!("HTTP client setup failed: {e}")))?;

        // Strip trailing slash for consistent URL construction
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET /api/favoritos/verificar/{user}/{movie}
    pub async fn check(&self, user_id: UserId, movie_id: MovieId) -> Result<FavoriteCheck, CinefavError> {
        self.fetch_json(Method::GET, &verify_favorite_path(user_id, movie_id)).await
    }

    /// GET /api/usuarios/{user}/estadisticas
    pub async fn stats(&self, user_id: UserId) -> Result<UserStats, CinefavError> {
        self.fetch_json(Method::GET, &user_stats_path(user_id)).await
    }

    async fn fetch_json<T: DeserializeOwned>(&self, method: Method, path: &str) -> Result<T, CinefavError> {
        let body = self.fetch(method, path).await?;
        from_json(&body)
    }

    /// Perform a request and return the body of a 2xx response.
    async fn fetch(&self, method: Method, path: &str) -> Result<Vec<u8>, CinefavError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .request(method.clone(), &url)
            .send()
            .await
            .map_err(|e| CinefavError::Transport(format!("{method} {url} failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| CinefavError::Transport(format!("reading response failed: {e}")))?;

        debug!(%method, %url, status = status.as_u16(), "response received");

        if status.is_success() {
            Ok(body.to_vec())
        } else {
            Err(CinefavError::from_status(status.as_u16(), error_message(&body)))
        }
    }
}

/// Pull the `error` field out of a JSON error body, falling back to the raw text.
fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| String::from_utf8_lossy(body).to_string())
}

#[async_trait(?Send)]
impl FavoritesRemote for HttpRemote {
    async fn list(&self, user_id: UserId) -> Result<Vec<Movie>, CinefavError> {
        self.fetch_json(Method::GET, &user_favorites_path(user_id)).await
    }

    async fn add(&self, user_id: UserId, movie_id: MovieId) -> Result<(), CinefavError> {
        let record: FavoriteRecord = self
            .fetch_json(Method::POST, &user_favorite_path(user_id, movie_id))
            .await?;
        debug!(user_id, movie_id, favorite_id = record.id, "favorite recorded");
        Ok(())
    }

    async fn remove(&self, user_id: UserId, movie_id: MovieId) -> Result<(), CinefavError> {
        self.fetch(Method::DELETE, &user_favorite_path(user_id, movie_id)).await?;
        Ok(())
    }
}
