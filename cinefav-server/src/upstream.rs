use std::time::Duration;

use axum::body::Bytes;
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::debug;

use cinefav_core::error::CinefavError;
use cinefav_core::models::serialization::from_json;

use crate::error::ServerError;

/// HTTP client bound to the upstream catalog API.
pub struct UpstreamClient {
    http: Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServerError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServerError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send `method path` upstream and return the body of a 2xx answer.
    pub async fn send(&self, method: Method, path: &str) -> Result<Bytes, CinefavError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);
        if method == Method::POST {
            request = request.header(reqwest::header::CONTENT_TYPE, "application/json");
        }

        let resp = request
            .send()
            .await
            .map_err(|e| CinefavError::Transport(format!("{method} {url} failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| CinefavError::Transport(format!("reading body of {url} failed: {e}")))?;

        debug!(%method, %url, status = status.as_u16(), size = body.len(), "upstream answered");

        if !status.is_success() {
            return Err(CinefavError::from_status(
                status.as_u16(),
                String::from_utf8_lossy(&body).to_string(),
            ));
        }

        Ok(body)
    }

    /// Like [`send`](Self::send) but decode the answer as JSON.
    pub async fn send_json(&self, method: Method, path: &str) -> Result<Value, CinefavError> {
        let body = self.send(method, path).await?;
        from_json(&body)
    }
}
