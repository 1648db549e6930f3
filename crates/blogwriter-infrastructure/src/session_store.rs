//! File-backed session persistence.
//!
//! Each CLI invocation is a fresh process, so the session the identity
//! provider issued is kept in `session.toml` between runs.

use crate::paths::WriterPaths;
use crate::storage::AtomicTomlFile;
use blogwriter_core::session::{Session, SessionStore};
use blogwriter_core::{Result, WriterError};
use chrono::Utc;
use std::path::PathBuf;

/// Stores the current session in a private TOML file.
pub struct FileSessionStore {
    file: AtomicTomlFile<Session>,
}

impl FileSessionStore {
    /// Creates a store at the default session path.
    pub fn new(paths: &WriterPaths) -> Result<Self> {
        let path = paths
            .session_file()
            .map_err(|e| WriterError::storage(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a store at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::private(path),
        }
    }
}

#[async_trait::async_trait]
impl SessionStore for FileSessionStore {
    /// Loads the persisted session.
    ///
    /// Sessions past their provider-reported expiry are discarded so that the
    /// client starts signed out instead of sending a dead token.
    async fn load(&self) -> Result<Option<Session>> {
        let Some(session) = self.file.load()? else {
            return Ok(None);
        };

        if session.is_expired_at(Utc::now()) {
            tracing::info!(
                path = %self.file.path().display(),
                "Persisted session has expired, discarding"
            );
            self.file.remove()?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> Result<()> {
        self.file.save(session)?;
        tracing::debug!(path = %self.file.path().display(), "Session persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.file.remove()?;
        tracing::debug!(path = %self.file.path().display(), "Session cleared");
        Ok(())
    }
}
