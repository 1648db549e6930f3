//! HttpGenerationBackend - REST client for the blog generation API.
//!
//! Endpoints:
//! - `POST {base}/v1/generate`
//! - `GET {base}/v1/posts`
//! - `GET {base}/healthz`

use crate::http::{build_client, detail_from_body, error_body, json_body, transport_error};
use async_trait::async_trait;
use blogwriter_core::config::{ClientConfig, normalize_url};
use blogwriter_core::error::{GENERIC_GENERATION_FAILURE, GENERIC_HISTORY_FAILURE};
use blogwriter_core::generation::{
    BackendHealth, GenerationBackend, GenerationRequest, GenerationResult, PostHistoryItem,
};
use blogwriter_core::{Result, WriterError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct PostsResponse {
    items: Vec<PostHistoryItem>,
}

/// Generation backend reached over HTTP.
#[derive(Clone)]
pub struct HttpGenerationBackend {
    client: Client,
    base_url: String,
}

impl HttpGenerationBackend {
    /// Creates a backend for `base_url` with the given request timeout.
    ///
    /// Returns `None` when `base_url` is blank.
    pub fn new(base_url: &str, timeout: Duration) -> Option<Self> {
        let base_url = normalize_url(Some(base_url))?;
        Some(Self {
            client: build_client(timeout),
            base_url,
        })
    }

    /// Creates a backend from configuration.
    ///
    /// Returns `None` when no base URL is configured; callers surface that as
    /// `WriterError::ConfigurationMissing` when a request is attempted.
    pub fn from_config(config: &ClientConfig) -> Option<Self> {
        let base_url = config.api_base_url()?;
        Self::new(
            &base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl GenerationBackend for HttpGenerationBackend {
    async fn generate(&self, token: &str, request: &GenerationRequest) -> Result<GenerationResult> {
        tracing::info!(
            keyword = %request.keyword,
            length = request.length,
            "Submitting generation request"
        );

        let response = self
            .client
            .post(self.url("/v1/generate"))
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error("Generation request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            let detail =
                detail_from_body(&body).unwrap_or_else(|| GENERIC_GENERATION_FAILURE.to_string());
            tracing::warn!(status = %status, detail = %detail, "Generation rejected");
            return Err(WriterError::backend_rejected(detail));
        }

        let result: GenerationResult = json_body("Generation response", response).await?;
        tracing::info!(
            usage_count = result.usage_count,
            usage_limit = result.usage_limit,
            remaining = result.remaining,
            content_len = result.content.len(),
            "Generation completed"
        );
        Ok(result)
    }

    async fn list_posts(&self, token: &str) -> Result<Vec<PostHistoryItem>> {
        let response = self
            .client
            .get(self.url("/v1/posts"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| transport_error("History request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            let detail =
                detail_from_body(&body).unwrap_or_else(|| GENERIC_HISTORY_FAILURE.to_string());
            tracing::warn!(status = %status, detail = %detail, "History fetch rejected");
            return Err(WriterError::history_fetch_failed(detail));
        }

        let posts: PostsResponse = json_body("History response", response).await?;
        tracing::debug!(count = posts.items.len(), "History fetched");
        Ok(posts.items)
    }

    async fn health(&self) -> Result<BackendHealth> {
        let response = self
            .client
            .get(self.url("/healthz"))
            .send()
            .await
            .map_err(|e| transport_error("Health check failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WriterError::backend_rejected(format!(
                "Health check returned {}",
                status
            )));
        }

        json_body("Health response", response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_base_url_yields_no_backend() {
        assert!(HttpGenerationBackend::new("  ", Duration::from_secs(1)).is_none());
        assert!(HttpGenerationBackend::from_config(&ClientConfig::default()).is_none());
    }

    #[test]
    fn test_urls_are_joined_without_double_slash() {
        let backend =
            HttpGenerationBackend::new("https://api.example.com/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(backend.base_url(), "https://api.example.com");
        assert_eq!(
            backend.url("/v1/generate"),
            "https://api.example.com/v1/generate"
        );
    }
}
