//! WriterController - the writer page's behaviour without its rendering.
//!
//! The controller owns the view state and routes user actions to the identity
//! provider and the generation workflow. Every failure ends up as the single
//! visible message in [`WriterState::error`]; none of them is fatal.

use crate::session_hub::SessionHub;
use crate::state::WriterState;
use crate::workflow::GenerationWorkflow;
use blogwriter_core::generation::{
    BackendHealth, GenerationResult, PostHistoryItem, SIGN_UP_CONFIRMATION_NOTICE,
};
use blogwriter_core::identity::{Credentials, IdentityProvider, SignUpOutcome};
use blogwriter_core::session::{Session, SessionSource};
use blogwriter_core::{Result, WriterError};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

pub struct WriterController {
    state: Arc<RwLock<WriterState>>,
    workflow: GenerationWorkflow,
    /// `None` when the identity provider is not configured
    identity: Option<Arc<dyn IdentityProvider>>,
    sessions: Arc<SessionHub>,
}

impl WriterController {
    pub fn new(
        workflow: GenerationWorkflow,
        identity: Option<Arc<dyn IdentityProvider>>,
        sessions: Arc<SessionHub>,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(WriterState::new())),
            workflow,
            identity,
            sessions,
        }
    }

    /// Returns a snapshot of the view state.
    pub async fn state(&self) -> WriterState {
        self.state.read().await.clone()
    }

    /// Applies a form edit (keyword, tone, length or content).
    pub async fn edit<F>(&self, f: F)
    where
        F: FnOnce(&mut WriterState),
    {
        let mut state = self.state.write().await;
        f(&mut state);
    }

    pub fn sessions(&self) -> &Arc<SessionHub> {
        &self.sessions
    }

    pub fn is_signed_in(&self) -> bool {
        self.sessions.is_signed_in()
    }

    /// Records `error` as the visible message and hands it back.
    async fn fail<T>(&self, error: WriterError) -> Result<T> {
        self.state.write().await.set_error(&error);
        Err(error)
    }

    fn identity(&self) -> Result<&Arc<dyn IdentityProvider>> {
        self.identity
            .as_ref()
            .ok_or_else(|| WriterError::identity("Identity provider is not configured"))
    }

    // ============================================================================
    // Identity
    // ============================================================================

    pub async fn sign_up(&self, credentials: &Credentials) -> Result<SignUpOutcome> {
        self.state.write().await.clear_error();

        let identity = match self.identity() {
            Ok(identity) => identity,
            Err(e) => return self.fail(e).await,
        };
        let outcome = match identity.sign_up(credentials).await {
            Ok(outcome) => outcome,
            Err(e) => return self.fail(e).await,
        };

        match &outcome {
            SignUpOutcome::SignedIn(session) => {
                self.publish_session(Some(session.clone())).await?;
            }
            SignUpOutcome::ConfirmationRequired => {
                self.state.write().await.usage_message = SIGN_UP_CONFIRMATION_NOTICE.to_string();
            }
        }
        Ok(outcome)
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        self.state.write().await.clear_error();

        let identity = match self.identity() {
            Ok(identity) => identity,
            Err(e) => return self.fail(e).await,
        };
        let session = match identity.sign_in(credentials).await {
            Ok(session) => session,
            Err(e) => return self.fail(e).await,
        };

        self.publish_session(Some(session.clone())).await?;
        Ok(session)
    }

    /// Signs out locally and on the provider.
    ///
    /// The local session and history are cleared even when the provider call
    /// fails; the provider error is only logged.
    pub async fn sign_out(&self) -> Result<()> {
        let current = self.sessions.current_session();

        if let (Some(session), Some(identity)) = (current.as_ref(), self.identity.as_ref())
            && let Err(e) = identity.sign_out(session).await
        {
            tracing::warn!(error = %e, "Provider sign-out failed, clearing local session anyway");
        }

        // Publish first: a generation finishing after this point sees the
        // signed-out session and leaves history empty.
        let published = self.publish_session(None).await;
        self.state.write().await.clear_history();
        published
    }

    async fn publish_session(&self, session: Option<Session>) -> Result<()> {
        match self.sessions.publish(session).await {
            Ok(()) => Ok(()),
            Err(e) => self.fail(e).await,
        }
    }

    /// Reacts to a session change: refresh history when signed in, clear it otherwise.
    pub async fn on_session_change(&self, session: Option<Session>) {
        match session.as_ref().and_then(Session::bearer_token) {
            Some(token) => {
                if let Err(e) = self.load_history(token).await {
                    tracing::warn!(error = %e, "History refresh on session change failed");
                }
            }
            None => self.state.write().await.clear_history(),
        }
    }

    /// Feeds every session change, starting with the current one, into
    /// [`Self::on_session_change`].
    pub fn spawn_session_listener(self: &Arc<Self>) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        let mut subscription = self.sessions.subscribe();
        tokio::spawn(async move {
            while let Some(session) = subscription.next().await {
                controller.on_session_change(session).await;
            }
        })
    }

    // ============================================================================
    // Generation and history
    // ============================================================================

    /// Submits the current form.
    ///
    /// Returns `Ok(None)` without contacting the backend when submitting is
    /// not allowed: blank keyword, or a generation already in flight.
    pub async fn generate(&self) -> Result<Option<GenerationResult>> {
        let request = {
            let mut state = self.state.write().await;
            if !state.begin_submit() {
                tracing::debug!("Submit ignored: blank keyword or generation in flight");
                return Ok(None);
            }
            state.request()
        };

        let submitted = self
            .workflow
            .submit_generation(&*self.sessions, &request)
            .await;

        let mut state = self.state.write().await;
        state.finish_submit();
        match submitted {
            Ok(outcome) => {
                state.apply_generation(&outcome.result);
                match outcome.history {
                    // A sign-out may land after the refresh returned.
                    Some(Ok(items)) if self.sessions.is_signed_in() => state.apply_history(items),
                    Some(Err(e)) => state.set_error(&e),
                    _ => state.clear_history(),
                }
                Ok(Some(outcome.result))
            }
            Err(e) => {
                state.set_error(&e);
                Err(e)
            }
        }
    }

    /// Re-fetches history for the current session.
    ///
    /// Signed out, the history is cleared and nothing is fetched.
    pub async fn refresh_history(&self) -> Result<Vec<PostHistoryItem>> {
        let session = self.sessions.current_session();
        match session.as_ref().and_then(Session::bearer_token) {
            Some(token) => self.load_history(token).await,
            None => {
                self.state.write().await.clear_history();
                Ok(Vec::new())
            }
        }
    }

    async fn load_history(&self, token: &str) -> Result<Vec<PostHistoryItem>> {
        match self.workflow.fetch_history(token).await {
            Ok(items) => {
                self.state.write().await.apply_history(items.clone());
                Ok(items)
            }
            Err(e) => self.fail(e).await,
        }
    }

    pub async fn check_health(&self) -> Result<BackendHealth> {
        match self.workflow.check_health().await {
            Ok(health) => Ok(health),
            Err(e) => self.fail(e).await,
        }
    }
}
