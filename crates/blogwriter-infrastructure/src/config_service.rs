//! Configuration service implementation.
//!
//! Loads [`ClientConfig`] from `config.toml` and layers environment
//! variables on top. Environment values win over the file.

use crate::paths::WriterPaths;
use crate::storage::AtomicTomlFile;
use blogwriter_core::config::ClientConfig;
use blogwriter_core::{Result, WriterError};
use std::sync::{Arc, PoisonError, RwLock};

/// Environment variables checked for the backend base URL, in priority order.
pub const API_BASE_URL_VARS: &[&str] = &["BLOGWRITER_API_BASE_URL", "API_BASE_URL"];
pub const AUTH_URL_VARS: &[&str] = &["BLOGWRITER_AUTH_URL", "SUPABASE_URL"];
pub const AUTH_ANON_KEY_VARS: &[&str] = &["BLOGWRITER_AUTH_ANON_KEY", "SUPABASE_ANON_KEY"];
pub const LOG_LEVEL_VAR: &str = "BLOGWRITER_LOG_LEVEL";
pub const REQUEST_TIMEOUT_VAR: &str = "BLOGWRITER_REQUEST_TIMEOUT_SECS";

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: WriterPaths,
    /// Cached configuration, filled on first access.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new(paths: WriterPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the effective configuration, loading it if not cached.
    ///
    /// A missing config file is not an error: every setting can come from
    /// the environment, and a missing base URL is reported when it is used.
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load(|name| std::env::var(name).ok())?;

        {
            let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }

    /// Writes `config` to `config.toml` and drops the cached value.
    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        AtomicTomlFile::new(self.config_path()?).save(config)?;
        self.invalidate_cache();
        Ok(())
    }

    /// Reads `config.toml` alone, without environment overrides.
    ///
    /// Use this as the base when editing and saving the file.
    pub fn load_file(&self) -> Result<ClientConfig> {
        let path = self.config_path()?;
        let from_file = AtomicTomlFile::<ClientConfig>::new(path.clone()).load()?;

        if from_file.is_none() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
        }

        Ok(from_file.unwrap_or_default())
    }

    /// Loads the file and applies overrides from `lookup`.
    fn load<F>(&self, lookup: F) -> Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(apply_env_overrides(self.load_file()?, lookup))
    }

    fn config_path(&self) -> Result<std::path::PathBuf> {
        self.paths
            .config_file()
            .map_err(|e| WriterError::storage(e.to_string()))
    }
}

/// Returns the first non-blank value among `names`.
fn first_set<F>(lookup: &F, names: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
}

/// Layers environment values over a file-loaded configuration.
pub fn apply_env_overrides<F>(mut config: ClientConfig, lookup: F) -> ClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = first_set(&lookup, API_BASE_URL_VARS) {
        config.api_base_url = Some(url);
    }
    if let Some(url) = first_set(&lookup, AUTH_URL_VARS) {
        config.identity.url = Some(url);
    }
    if let Some(key) = first_set(&lookup, AUTH_ANON_KEY_VARS) {
        config.identity.anon_key = Some(key);
    }
    if let Some(level) = first_set(&lookup, &[LOG_LEVEL_VAR]) {
        config.log_level = Some(level);
    }
    if let Some(raw) = first_set(&lookup, &[REQUEST_TIMEOUT_VAR]) {
        match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => config.request_timeout_secs = secs,
            _ => tracing::warn!(value = %raw, "Ignoring invalid {}", REQUEST_TIMEOUT_VAR),
        }
    }
    config
}
