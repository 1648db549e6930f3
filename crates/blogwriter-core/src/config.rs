//! Client configuration model.
//!
//! Loaded from `config.toml` and environment variables by the infrastructure
//! layer. Every field is optional on disk.

use serde::{Deserialize, Serialize};

/// Default timeout for backend calls. Generation can take a while.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the generation backend, e.g. `https://api.example.com`
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Tracing filter used when `RUST_LOG` is unset, e.g. "info" or "blogwriter=debug"
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub identity: IdentityConfig,
}

/// Identity provider (GoTrue-compatible auth API) settings.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: None,
            identity: IdentityConfig::default(),
        }
    }
}

impl ClientConfig {
    /// The backend base URL without trailing slashes, or `None` when blank.
    pub fn api_base_url(&self) -> Option<String> {
        normalize_url(self.api_base_url.as_deref())
    }

    /// The identity provider URL without trailing slashes, or `None` when blank.
    pub fn identity_url(&self) -> Option<String> {
        normalize_url(self.identity.url.as_deref())
    }

    pub fn identity_anon_key(&self) -> Option<String> {
        self.identity
            .anon_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
    }
}

/// Trims whitespace and trailing slashes; blank values count as absent.
pub fn normalize_url(url: Option<&str>) -> Option<String> {
    let trimmed = url?.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Masks a secret for display, keeping only the first four characters.
pub fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    format!("{}…", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.request_timeout_secs, 120);
        assert!(config.api_base_url().is_none());
    }

    #[test]
    fn test_full_toml() {
        let config: ClientConfig = toml::from_str(
            r#"
            api_base_url = "https://api.example.com/"
            request_timeout_secs = 30

            [identity]
            url = "https://auth.example.com"
            anon_key = "anon"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.api_base_url().as_deref(),
            Some("https://api.example.com")
        );
        assert_eq!(
            config.identity_url().as_deref(),
            Some("https://auth.example.com")
        );
        assert_eq!(config.identity_anon_key().as_deref(), Some("anon"));
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url(None), None);
        assert_eq!(normalize_url(Some("  ")), None);
        assert_eq!(normalize_url(Some("/")), None);
        assert_eq!(
            normalize_url(Some(" http://x//")).as_deref(),
            Some("http://x")
        );
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcdefgh"), "abcd…");
        assert_eq!(mask_secret("ab"), "ab…");
    }
}
