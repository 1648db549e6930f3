//! Generation request workflow.
//!
//! Checks local preconditions, sends exactly one generation request, and on
//! success refreshes history with the token current at that moment.

use blogwriter_core::generation::{
    BackendHealth, GenerationBackend, GenerationRequest, GenerationResult, PostHistoryItem,
};
use blogwriter_core::session::{Session, SessionSource};
use blogwriter_core::{Result, WriterError};
use std::sync::Arc;

/// Result of a successful generation plus the follow-up history refresh.
///
/// The refresh has its own result: a failed refresh does not make the
/// generation a failure. `history` is `None` when the session ended while the
/// generation was in flight, so no refresh was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub result: GenerationResult,
    pub history: Option<Result<Vec<PostHistoryItem>>>,
}

/// Orchestrates generation and history requests against the backend.
///
/// `backend` is `None` when no base URL is configured; every request then
/// fails with [`WriterError::ConfigurationMissing`].
#[derive(Clone)]
pub struct GenerationWorkflow {
    backend: Option<Arc<dyn GenerationBackend>>,
}

impl GenerationWorkflow {
    pub fn new(backend: Option<Arc<dyn GenerationBackend>>) -> Self {
        Self { backend }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    fn backend(&self) -> Result<&Arc<dyn GenerationBackend>> {
        self.backend.as_ref().ok_or(WriterError::ConfigurationMissing)
    }

    /// Sends one generation request after the local checks pass.
    ///
    /// # Errors
    ///
    /// Checked in this order, before any network call:
    /// - `Unauthenticated`: no session or no bearer token
    /// - `ConfigurationMissing`: no backend configured
    /// - `InvalidRequest`: blank keyword or length out of range
    ///
    /// Then `BackendRejected` / `Transport` from the backend itself.
    pub async fn generate(
        &self,
        session: Option<&Session>,
        request: &GenerationRequest,
    ) -> Result<GenerationResult> {
        let token = session
            .and_then(Session::bearer_token)
            .ok_or(WriterError::Unauthenticated)?;
        let backend = self.backend()?;
        request.validate().map_err(WriterError::InvalidRequest)?;

        backend.generate(token, request).await
    }

    /// Generates and, on success only, refreshes history.
    ///
    /// The session is read from `sessions` twice: once for the generation and
    /// again once it succeeds, so the refresh never uses a token that was
    /// replaced or revoked in the meantime.
    pub async fn submit_generation(
        &self,
        sessions: &dyn SessionSource,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome> {
        let submitted_with = sessions.current_session();
        let result = self.generate(submitted_with.as_ref(), request).await?;

        let current = sessions.current_session();
        let history = match current.as_ref().and_then(Session::bearer_token) {
            Some(token) => Some(self.fetch_history(token).await),
            None => {
                tracing::debug!("Signed out during generation, skipping history refresh");
                None
            }
        };

        if let Some(Err(e)) = &history {
            tracing::warn!(error = %e, "History refresh after generation failed");
        }

        Ok(GenerationOutcome { result, history })
    }

    /// Fetches the full history list, in server order.
    pub async fn fetch_history(&self, token: &str) -> Result<Vec<PostHistoryItem>> {
        if token.trim().is_empty() {
            return Err(WriterError::Unauthenticated);
        }
        self.backend()?.list_posts(token).await
    }

    pub async fn check_health(&self) -> Result<BackendHealth> {
        self.backend()?.health().await
    }
}
