//! Unified path management for blogwriter files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/blogwriter/        # Config directory
//! ├── config.toml              # Client configuration
//! ├── session.toml             # Current identity provider session (0600)
//! └── logs/                    # Log files
//!     └── blogwriter.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR_NAME: &str = "blogwriter";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Platform config directory could not be determined.
    #[error("Cannot find config directory")]
    ConfigDirNotFound,
}

/// Resolves blogwriter file locations.
///
/// `WriterPaths::new(None)` uses the platform config directory;
/// `WriterPaths::new(Some(dir))` roots everything under `dir` (tests, `--config-dir`).
#[derive(Debug, Clone)]
pub struct WriterPaths {
    base_dir: Option<PathBuf>,
}

impl WriterPaths {
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    /// Returns the blogwriter configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/blogwriter/`
    /// - `Err(PathError::ConfigDirNotFound)`: no platform config directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session.
    ///
    /// # Security Note
    ///
    /// The file holds a bearer token and is written with mode 600 on Unix.
    pub fn session_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("session.toml"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}

impl Default for WriterPaths {
    fn default() -> Self {
        Self::new(None)
    }
}
