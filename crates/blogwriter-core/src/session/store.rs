use super::model::Session;
use crate::error::Result;

/// Persistence for the current session between process runs.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the persisted session, if one exists.
    async fn load(&self) -> Result<Option<Session>>;

    /// Replaces the persisted session.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Removes the persisted session. Clearing an absent session is not an error.
    async fn clear(&self) -> Result<()>;
}
