//! Identity provider interface.
//!
//! Sign-up, sign-in and sign-out are delegated to an external provider.
//! Token refresh is the provider's concern and is not modelled here.

use crate::error::Result;
use crate::session::Session;
use serde::Serialize;

/// Email/password credentials.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// What a successful sign-up produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The provider signed the user in immediately.
    SignedIn(Session),
    /// The account exists but must be confirmed (usually by email) first.
    ConfirmationRequired,
}

/// An external identity provider.
///
/// Failures are reported as `WriterError::IdentityProvider` with the
/// provider's own message.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, credentials: &Credentials) -> Result<SignUpOutcome>;

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session>;

    /// Revokes the given session on the provider side.
    async fn sign_out(&self, session: &Session) -> Result<()>;
}
