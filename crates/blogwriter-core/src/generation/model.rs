//! Generation request, result and history models.
//!
//! These mirror the backend's JSON shapes. Field names are the wire names.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Tone sent when the user does not choose one.
pub const DEFAULT_TONE: &str = "professional yet easy to understand";
/// Target length (characters) sent when the user does not choose one.
pub const DEFAULT_LENGTH: u32 = 2000;
pub const MIN_LENGTH: u32 = 500;
pub const MAX_LENGTH: u32 = 5000;

/// A single generation submission. Built fresh per submit, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub keyword: String,
    pub tone: String,
    pub length: u32,
}

impl GenerationRequest {
    /// Creates a request with the default tone and length.
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            tone: DEFAULT_TONE.to_string(),
            length: DEFAULT_LENGTH,
        }
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = length;
        self
    }

    /// Whether the keyword has any non-whitespace content.
    pub fn has_keyword(&self) -> bool {
        !self.keyword.trim().is_empty()
    }

    /// Checks the request against the backend's accepted ranges.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: the request may be sent
    /// - `Err(String)`: human-readable reason it may not
    pub fn validate(&self) -> Result<(), String> {
        if !self.has_keyword() {
            return Err("keyword must not be empty".to_string());
        }
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&self.length) {
            return Err(format!(
                "length must be between {} and {} (got {})",
                MIN_LENGTH, MAX_LENGTH, self.length
            ));
        }
        Ok(())
    }
}

/// A successful generation response.
///
/// `usage_count`, `usage_limit` and `remaining` are authoritative server values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    pub usage_count: u32,
    pub usage_limit: u32,
    pub remaining: u32,
}

/// A prior generation as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostHistoryItem {
    pub id: String,
    pub keyword: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    /// Server timestamp, kept exactly as received
    pub created_at: String,
}

impl PostHistoryItem {
    /// Parses `created_at` as RFC 3339 and converts it to local time.
    ///
    /// Returns `None` when the server used another format.
    pub fn created_at_local(&self) -> Option<DateTime<Local>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Local))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
