//! Session change subscription.

use super::model::Session;
use tokio::sync::watch;

/// Source of truth for the current identity provider session.
///
/// Consumers read the latest value on every decision instead of caching a
/// token of their own.
pub trait SessionSource: Send + Sync {
    /// Returns the current session, if any.
    fn current_session(&self) -> Option<Session>;

    /// Subscribes to session changes.
    ///
    /// The subscription yields the current value first, so the initial load
    /// is observed like any other change.
    fn subscribe(&self) -> SessionSubscription;
}

/// A stream of session values backed by a watch channel.
pub struct SessionSubscription {
    receiver: watch::Receiver<Option<Session>>,
    initial_pending: bool,
}

impl SessionSubscription {
    pub fn new(receiver: watch::Receiver<Option<Session>>) -> Self {
        Self {
            receiver,
            initial_pending: true,
        }
    }

    /// Waits for the next session value.
    ///
    /// Returns `None` once the publishing side is gone.
    pub async fn next(&mut self) -> Option<Option<Session>> {
        if self.initial_pending {
            self.initial_pending = false;
            return Some(self.receiver.borrow_and_update().clone());
        }

        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}
