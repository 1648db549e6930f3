//! GoTrueIdentityProvider - REST client for a GoTrue-compatible auth API
//! (the API behind Supabase Auth).
//!
//! Only password sign-up, sign-in and sign-out are implemented. Token refresh
//! stays with the provider.

use crate::http::{build_client, error_body, json_body, transport_error};
use async_trait::async_trait;
use blogwriter_core::config::{ClientConfig, normalize_url};
use blogwriter_core::identity::{Credentials, IdentityProvider, SignUpOutcome};
use blogwriter_core::session::{Session, SessionUser};
use blogwriter_core::{Result, WriterError};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::time::Duration;

const AUTH_TIMEOUT: Duration = Duration::from_secs(30);

/// Token/session payload returned by sign-in and (optionally) sign-up.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Unix seconds
    #[serde(default)]
    expires_at: Option<i64>,
    /// Seconds from now
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    user: Option<UserResponse>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// GoTrue has used several error shapes across versions.
#[derive(Debug, Default, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ProviderErrorBody {
    fn into_message(self) -> Option<String> {
        [self.error_description, self.msg, self.message, self.error]
            .into_iter()
            .flatten()
            .find(|m| !m.trim().is_empty())
    }
}

/// Extracts the provider's error message from a response body.
fn provider_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ProviderErrorBody>(body)
        .ok()
        .and_then(ProviderErrorBody::into_message)
        .unwrap_or_else(|| fallback.to_string())
}

impl TokenResponse {
    /// Converts the payload into a session, or `None` when it carries no token.
    fn into_session(self, now: DateTime<Utc>) -> Option<Session> {
        let access_token = self.access_token.filter(|t| !t.trim().is_empty())?;

        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .or_else(|| {
                self.expires_in
                    .map(|secs| now + ChronoDuration::seconds(secs))
            });

        let mut session = Session::new(access_token);
        if let Some(token_type) = self.token_type {
            session.token_type = token_type;
        }
        session.refresh_token = self.refresh_token;
        session.expires_at = expires_at;
        session.user = self.user.map(|u| SessionUser {
            id: u.id,
            email: u.email,
        });
        Some(session)
    }
}

/// Identity provider reached over the GoTrue REST API.
#[derive(Clone)]
pub struct GoTrueIdentityProvider {
    client: Client,
    auth_url: String,
    anon_key: String,
}

impl GoTrueIdentityProvider {
    /// Creates a provider for the project at `auth_url`.
    ///
    /// `auth_url` is the project root (e.g. `https://xyz.supabase.co`); the
    /// `/auth/v1` prefix is added here.
    pub fn new(auth_url: &str, anon_key: impl Into<String>) -> Result<Self> {
        let auth_url = normalize_url(Some(auth_url))
            .ok_or_else(|| WriterError::identity("Identity provider URL is empty"))?;
        Ok(Self {
            client: build_client(AUTH_TIMEOUT),
            auth_url,
            anon_key: anon_key.into(),
        })
    }

    /// Creates a provider from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let (Some(url), Some(anon_key)) = (config.identity_url(), config.identity_anon_key())
        else {
            return Err(WriterError::identity(
                "Identity provider is not configured (set SUPABASE_URL and SUPABASE_ANON_KEY)",
            ));
        };
        Self::new(&url, anon_key)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(format!("{}/auth/v1{}", self.auth_url, path))
            .header("apikey", &self.anon_key)
    }

    /// Sends `request` and returns the token payload of a success response.
    async fn token_request(
        &self,
        context: &str,
        request: RequestBuilder,
    ) -> Result<TokenResponse> {
        let response = request
            .send()
            .await
            .map_err(|e| transport_error(context, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            let message = provider_message(&body, context);
            tracing::warn!(status = %status, message = %message, "{}", context);
            return Err(WriterError::identity(message));
        }

        json_body(context, response).await
    }
}

#[async_trait]
impl IdentityProvider for GoTrueIdentityProvider {
    async fn sign_up(&self, credentials: &Credentials) -> Result<SignUpOutcome> {
        let payload = self
            .token_request("Sign-up failed", self.post("/signup").json(credentials))
            .await?;

        match payload.into_session(Utc::now()) {
            Some(session) => {
                tracing::info!(email = %credentials.email, "Signed up and signed in");
                Ok(SignUpOutcome::SignedIn(session))
            }
            None => {
                tracing::info!(email = %credentials.email, "Signed up, confirmation required");
                Ok(SignUpOutcome::ConfirmationRequired)
            }
        }
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        let payload = self
            .token_request(
                "Sign-in failed",
                self.post("/token")
                    .query(&[("grant_type", "password")])
                    .json(credentials),
            )
            .await?;

        let session = payload
            .into_session(Utc::now())
            .ok_or_else(|| WriterError::identity("Sign-in response did not contain a session"))?;
        tracing::info!(email = %credentials.email, "Signed in");
        Ok(session)
    }

    async fn sign_out(&self, session: &Session) -> Result<()> {
        let Some(token) = session.bearer_token() else {
            return Ok(());
        };

        let response = self
            .post("/logout")
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| transport_error("Sign-out failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            return Err(WriterError::identity(provider_message(
                &body,
                "Sign-out failed",
            )));
        }

        tracing::info!("Signed out");
        Ok(())
    }
}
