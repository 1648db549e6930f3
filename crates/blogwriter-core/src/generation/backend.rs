use super::model::{GenerationRequest, GenerationResult, PostHistoryItem};
use crate::error::Result;

/// Health report from the backend's `/healthz` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct BackendHealth {
    pub status: String,
}

impl BackendHealth {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// The external content generation API.
///
/// Implementations send exactly one request per call and never retry.
#[async_trait::async_trait]
pub trait GenerationBackend: Send + Sync {
    /// `POST /v1/generate`.
    ///
    /// Non-success statuses map to `WriterError::BackendRejected`.
    async fn generate(&self, token: &str, request: &GenerationRequest)
        -> Result<GenerationResult>;

    /// `GET /v1/posts`, items in server order.
    ///
    /// Non-success statuses map to `WriterError::HistoryFetchFailed`.
    async fn list_posts(&self, token: &str) -> Result<Vec<PostHistoryItem>>;

    /// `GET /healthz`.
    async fn health(&self) -> Result<BackendHealth>;
}
