//! Watch-channel implementation of [`SessionSource`].

use blogwriter_core::Result;
use blogwriter_core::session::{Session, SessionSource, SessionStore, SessionSubscription};
use std::sync::Arc;
use tokio::sync::watch;

/// Holds the current session and fans out every change to subscribers.
///
/// When a [`SessionStore`] is attached, the initial value is loaded from it
/// and every published change is written back.
pub struct SessionHub {
    sender: watch::Sender<Option<Session>>,
    store: Option<Arc<dyn SessionStore>>,
}

impl SessionHub {
    /// Creates an in-memory hub starting at `initial`.
    pub fn new(initial: Option<Session>) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender,
            store: None,
        }
    }

    /// Creates a hub backed by `store`, starting from its persisted session.
    ///
    /// A store that fails to load is logged and treated as empty so the
    /// client still starts, signed out.
    pub async fn with_store(store: Arc<dyn SessionStore>) -> Self {
        let initial = match store.load().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load persisted session, starting signed out");
                None
            }
        };

        let (sender, _) = watch::channel(initial);
        Self {
            sender,
            store: Some(store),
        }
    }

    /// Publishes a new session (or sign-out) to all subscribers.
    ///
    /// Subscribers see the change even when persisting it fails; the
    /// persistence error is returned to the caller.
    pub async fn publish(&self, session: Option<Session>) -> Result<()> {
        let signed_in = session.is_some();
        self.sender.send_replace(session.clone());
        tracing::debug!(signed_in, "Session changed");

        let Some(store) = &self.store else {
            return Ok(());
        };

        match session {
            Some(session) => store.save(&session).await,
            None => store.clear().await,
        }
    }

    /// Whether the current session carries a bearer token.
    pub fn is_signed_in(&self) -> bool {
        self.sender
            .borrow()
            .as_ref()
            .and_then(Session::bearer_token)
            .is_some()
    }
}

impl SessionSource for SessionHub {
    fn current_session(&self) -> Option<Session> {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> SessionSubscription {
        SessionSubscription::new(self.sender.subscribe())
    }
}
