//! Shared HTTP plumbing for the API clients.

use blogwriter_core::WriterError;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

/// Builds a client with the given overall request timeout.
pub(crate) fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to default HTTP client");
            Client::new()
        })
}

/// Maps a reqwest failure that produced no HTTP response.
pub(crate) fn transport_error(context: &str, err: reqwest::Error) -> WriterError {
    if err.is_timeout() {
        WriterError::transport(format!("{}: request timed out", context))
    } else {
        WriterError::transport(format!("{}: {}", context, err))
    }
}

/// Reads the body of a non-success response.
///
/// A body that cannot be read is treated as empty; the caller falls back to
/// its generic message.
pub(crate) async fn error_body(response: Response) -> String {
    response.text().await.unwrap_or_default()
}

/// Reads a success body and decodes it as JSON.
pub(crate) async fn json_body<T>(context: &str, response: Response) -> Result<T, WriterError>
where
    T: serde::de::DeserializeOwned,
{
    let text = response
        .text()
        .await
        .map_err(|e| transport_error(context, e))?;
    Ok(serde_json::from_str(&text)?)
}

/// Backend error body: `{"detail": ...}`.
///
/// Only a string `detail` is surfaced. Validation errors carry an array
/// there and fall back to the caller's generic message.
#[derive(Debug, Deserialize)]
struct DetailBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Extracts a usable `detail` string from a backend error body.
pub(crate) fn detail_from_body(body: &str) -> Option<String> {
    let parsed: DetailBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}
