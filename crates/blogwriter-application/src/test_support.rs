//! In-memory fakes for the application layer tests.

use blogwriter_core::generation::{
    BackendHealth, GenerationBackend, GenerationRequest, GenerationResult, PostHistoryItem,
};
use blogwriter_core::identity::{Credentials, IdentityProvider, SignUpOutcome};
use blogwriter_core::session::{Session, SessionStore};
use blogwriter_core::{Result, WriterError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn sample_result() -> GenerationResult {
    GenerationResult {
        content: "X".to_string(),
        usage_count: 1,
        usage_limit: 3,
        remaining: 2,
    }
}

pub fn history_item(id: &str, keyword: &str) -> PostHistoryItem {
    PostHistoryItem {
        id: id.to_string(),
        keyword: keyword.to_string(),
        tone: Some("casual".to_string()),
        length: Some(2000),
        content: format!("content for {}", keyword),
        created_at: "2025-01-01T00:00:00+00:00".to_string(),
    }
}

/// Backend returning scripted responses and recording calls.
#[derive(Default)]
pub struct FakeBackend {
    generate_response: Mutex<Option<Result<GenerationResult>>>,
    history_response: Mutex<Option<Result<Vec<PostHistoryItem>>>>,
    tokens: Mutex<Vec<String>>,
    generate_calls: AtomicUsize,
    list_calls: AtomicUsize,
    /// When set, `generate` waits for a notification before answering
    gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeBackend {
    pub fn set_generate(&self, response: Result<GenerationResult>) {
        *self.generate_response.lock().unwrap() = Some(response);
    }

    pub fn set_history(&self, response: Result<Vec<PostHistoryItem>>) {
        *self.history_response.lock().unwrap() = Some(response);
    }

    /// Makes `generate` block until the returned handle is notified.
    pub fn hold_generation(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Tokens seen, in call order, across generate and list calls.
    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl GenerationBackend for FakeBackend {
    async fn generate(&self, token: &str, _request: &GenerationRequest) -> Result<GenerationResult> {
        self.tokens.lock().unwrap().push(token.to_string());
        self.generate_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.generate_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(sample_result()))
    }

    async fn list_posts(&self, token: &str) -> Result<Vec<PostHistoryItem>> {
        self.tokens.lock().unwrap().push(token.to_string());
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        self.history_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn health(&self) -> Result<BackendHealth> {
        Ok(BackendHealth {
            status: "ok".to_string(),
        })
    }
}

/// Identity provider returning scripted responses.
pub struct FakeIdentity {
    pub sign_in_response: Mutex<Result<Session>>,
    pub sign_up_response: Mutex<Result<SignUpOutcome>>,
    pub sign_out_response: Mutex<Result<()>>,
    pub sign_out_calls: AtomicUsize,
}

impl Default for FakeIdentity {
    fn default() -> Self {
        Self {
            sign_in_response: Mutex::new(Ok(Session::new("signed-in-token"))),
            sign_up_response: Mutex::new(Ok(SignUpOutcome::ConfirmationRequired)),
            sign_out_response: Mutex::new(Ok(())),
            sign_out_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl IdentityProvider for FakeIdentity {
    async fn sign_up(&self, _credentials: &Credentials) -> Result<SignUpOutcome> {
        self.sign_up_response.lock().unwrap().clone()
    }

    async fn sign_in(&self, _credentials: &Credentials) -> Result<Session> {
        self.sign_in_response.lock().unwrap().clone()
    }

    async fn sign_out(&self, _session: &Session) -> Result<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.sign_out_response.lock().unwrap().clone()
    }
}

/// Session store kept in memory.
#[derive(Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
    fail: bool,
}

impl MemorySessionStore {
    pub fn with(session: Option<Session>) -> Self {
        Self {
            session: Mutex::new(session),
            fail: false,
        }
    }

    /// A store whose every operation fails.
    pub fn failing() -> Self {
        Self {
            session: Mutex::new(None),
            fail: true,
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            Err(WriterError::storage("disk unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        self.check()?;
        Ok(self.current())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        self.check()?;
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.check()?;
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}
