//! Session domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated session issued by the identity provider.
///
/// The session is owned by the identity provider integration. Everything else
/// only reads the bearer token through [`Session::bearer_token`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque credential attached as `Authorization: Bearer <token>`
    pub access_token: String,
    /// Token type reported by the provider (normally "bearer")
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Absolute expiry, when the provider reported one
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

/// The signed-in user as reported alongside the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Creates a session carrying only an access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: default_token_type(),
            refresh_token: None,
            expires_at: None,
            user: None,
        }
    }

    pub fn with_user(mut self, user: SessionUser) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Returns the bearer token, or `None` when the token is blank.
    pub fn bearer_token(&self) -> Option<&str> {
        let token = self.access_token.trim();
        if token.is_empty() { None } else { Some(token) }
    }

    /// Whether the provider-reported expiry lies at or before `now`.
    ///
    /// Sessions without an expiry never expire client-side.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    /// Email of the signed-in user, if the provider reported one.
    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.email.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_bearer_token_present() {
        let session = Session::new("abc");
        assert_eq!(session.bearer_token(), Some("abc"));
    }

    #[test]
    fn test_blank_token_is_not_a_bearer_token() {
        assert_eq!(Session::new("").bearer_token(), None);
        assert_eq!(Session::new("   ").bearer_token(), None);
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let session = Session::new("abc").with_expires_at(now - Duration::seconds(1));
        assert!(session.is_expired_at(now));

        let session = Session::new("abc").with_expires_at(now + Duration::hours(1));
        assert!(!session.is_expired_at(now));

        assert!(!Session::new("abc").is_expired_at(now));
    }

    #[test]
    fn test_deserialize_minimal() {
        let session: Session = toml::from_str(r#"access_token = "t""#).unwrap();
        assert_eq!(session.token_type, "bearer");
        assert!(session.user.is_none());
        assert!(session.email().is_none());
    }
}
