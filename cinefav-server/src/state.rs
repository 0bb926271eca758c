use crate::upstream::UpstreamClient;

/// Shared application state passed to all handlers via Axum's State extractor.
pub struct AppState {
    /// Client for the upstream catalog API.
    pub upstream: UpstreamClient,
}
