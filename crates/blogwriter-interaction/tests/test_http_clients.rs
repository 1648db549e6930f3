use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use blogwriter_core::WriterError;
use blogwriter_core::generation::{GenerationBackend, GenerationRequest};
use blogwriter_core::identity::{Credentials, IdentityProvider, SignUpOutcome};
use blogwriter_core::session::Session;
use blogwriter_interaction::{GoTrueIdentityProvider, HttpGenerationBackend};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Requests seen by a test server: (path, headers, body).
#[derive(Default)]
struct Recorder {
    requests: Mutex<Vec<(String, HeaderMap, Value)>>,
}

impl Recorder {
    fn record(&self, path: &str, headers: HeaderMap, body: Value) {
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), headers, body));
    }

    fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn last(&self) -> (String, HeaderMap, Value) {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn backend(base_url: &str) -> HttpGenerationBackend {
    HttpGenerationBackend::new(base_url, Duration::from_secs(5)).unwrap()
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

// ============================================================================
// Generation backend
// ============================================================================

#[tokio::test]
async fn test_generate_sends_bearer_and_body() {
    let recorder = Arc::new(Recorder::default());
    let router = Router::new()
        .route(
            "/v1/generate",
            post(
                |State(rec): State<Arc<Recorder>>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    rec.record("/v1/generate", headers, body);
                    Json(json!({
                        "content": "X",
                        "usage_count": 1,
                        "usage_limit": 3,
                        "remaining": 2
                    }))
                },
            ),
        )
        .with_state(recorder.clone());
    let base_url = serve(router).await;

    let request = GenerationRequest::new("rust")
        .with_tone("casual")
        .with_length(1500);
    let result = backend(&base_url).generate("tok", &request).await.unwrap();

    assert_eq!(result.content, "X");
    assert_eq!(result.usage_count, 1);
    assert_eq!(result.usage_limit, 3);
    assert_eq!(result.remaining, 2);

    let (path, headers, body) = recorder.last();
    assert_eq!(path, "/v1/generate");
    assert_eq!(bearer(&headers).as_deref(), Some("Bearer tok"));
    assert_eq!(
        body,
        json!({"keyword": "rust", "tone": "casual", "length": 1500})
    );
    assert_eq!(recorder.count(), 1);
}

#[tokio::test]
async fn test_generate_rejection_surfaces_detail() {
    let router = Router::new().route(
        "/v1/generate",
        post(|| async {
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({"detail": "quota exceeded"})),
            )
        }),
    );
    let base_url = serve(router).await;

    let err = backend(&base_url)
        .generate("tok", &GenerationRequest::new("rust"))
        .await
        .unwrap_err();

    assert_eq!(err, WriterError::backend_rejected("quota exceeded"));
    assert_eq!(err.user_message(), "quota exceeded");
}

#[tokio::test]
async fn test_generate_rejection_without_detail_is_generic() {
    let router = Router::new().route(
        "/v1/generate",
        post(|| async { (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>") }),
    );
    let base_url = serve(router).await;

    let err = backend(&base_url)
        .generate("tok", &GenerationRequest::new("rust"))
        .await
        .unwrap_err();

    assert_eq!(err, WriterError::backend_rejected("Generation failed"));
}

#[tokio::test]
async fn test_list_posts_keeps_server_order() {
    let recorder = Arc::new(Recorder::default());
    let router = Router::new()
        .route(
            "/v1/posts",
            get(|State(rec): State<Arc<Recorder>>, headers: HeaderMap| async move {
                rec.record("/v1/posts", headers, Value::Null);
                Json(json!({"items": [
                    {"id": "2", "keyword": "newer", "tone": "t", "length": 1000,
                     "content": "b", "created_at": "2025-02-01T00:00:00+00:00"},
                    {"id": "1", "keyword": "kw", "tone": null, "length": null,
                     "content": "a", "created_at": "2025-01-01T00:00:00+00:00"}
                ]}))
            }),
        )
        .with_state(recorder.clone());
    let base_url = serve(router).await;

    let items = backend(&base_url).list_posts("tok").await.unwrap();

    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
    assert_eq!(items[1].keyword, "kw");
    assert_eq!(items[1].tone, None);

    let (_, headers, _) = recorder.last();
    assert_eq!(bearer(&headers).as_deref(), Some("Bearer tok"));
}

#[tokio::test]
async fn test_list_posts_rejection() {
    let router = Router::new().route(
        "/v1/posts",
        get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Invalid token"}))) }),
    );
    let base_url = serve(router).await;

    let err = backend(&base_url).list_posts("tok").await.unwrap_err();
    assert_eq!(err, WriterError::history_fetch_failed("Invalid token"));
}

#[tokio::test]
async fn test_health() {
    let router = Router::new().route("/healthz", get(|| async { Json(json!({"status": "ok"})) }));
    let base_url = serve(router).await;

    let health = backend(&base_url).health().await.unwrap();
    assert!(health.is_ok());
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = backend(&format!("http://{}", addr))
        .generate("tok", &GenerationRequest::new("rust"))
        .await
        .unwrap_err();

    assert!(matches!(err, WriterError::Transport { .. }));
}

// ============================================================================
// Identity provider
// ============================================================================

fn token_payload() -> Value {
    json!({
        "access_token": "at-1",
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "rt-1",
        "user": {"id": "u1", "email": "a@example.com"}
    })
}

#[tokio::test]
async fn test_sign_in_uses_password_grant_and_apikey() {
    let recorder = Arc::new(Recorder::default());
    let router = Router::new()
        .route(
            "/auth/v1/token",
            post(
                |State(rec): State<Arc<Recorder>>,
                 Query(query): Query<HashMap<String, String>>,
                 headers: HeaderMap,
                 Json(body): Json<Value>| async move {
                    let grant = query.get("grant_type").cloned().unwrap_or_default();
                    rec.record(&format!("/auth/v1/token?{}", grant), headers, body);
                    Json(token_payload())
                },
            ),
        )
        .with_state(recorder.clone());
    let base_url = serve(router).await;

    let provider = GoTrueIdentityProvider::new(&base_url, "anon-key").unwrap();
    let session = provider
        .sign_in(&Credentials::new("a@example.com", "pw"))
        .await
        .unwrap();

    assert_eq!(session.access_token, "at-1");
    assert_eq!(session.email(), Some("a@example.com"));
    assert!(session.expires_at.is_some());

    let (path, headers, body) = recorder.last();
    assert_eq!(path, "/auth/v1/token?password");
    assert_eq!(
        headers.get("apikey").and_then(|v| v.to_str().ok()),
        Some("anon-key")
    );
    assert_eq!(body, json!({"email": "a@example.com", "password": "pw"}));
}

#[tokio::test]
async fn test_sign_in_failure_carries_provider_message() {
    let router = Router::new().route(
        "/auth/v1/token",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "invalid_grant", "error_description": "Invalid login credentials"})),
            )
        }),
    );
    let base_url = serve(router).await;

    let provider = GoTrueIdentityProvider::new(&base_url, "anon-key").unwrap();
    let err = provider
        .sign_in(&Credentials::new("a@example.com", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err, WriterError::identity("Invalid login credentials"));
}

#[tokio::test]
async fn test_sign_up_requiring_confirmation() {
    let router = Router::new().route(
        "/auth/v1/signup",
        post(|| async { Json(json!({"id": "u1", "email": "a@example.com"})) }),
    );
    let base_url = serve(router).await;

    let provider = GoTrueIdentityProvider::new(&base_url, "anon-key").unwrap();
    let outcome = provider
        .sign_up(&Credentials::new("a@example.com", "pw"))
        .await
        .unwrap();

    assert_eq!(outcome, SignUpOutcome::ConfirmationRequired);
}

#[tokio::test]
async fn test_sign_up_with_immediate_session() {
    let router = Router::new().route("/auth/v1/signup", post(|| async { Json(token_payload()) }));
    let base_url = serve(router).await;

    let provider = GoTrueIdentityProvider::new(&base_url, "anon-key").unwrap();
    let outcome = provider
        .sign_up(&Credentials::new("a@example.com", "pw"))
        .await
        .unwrap();

    assert!(matches!(outcome, SignUpOutcome::SignedIn(s) if s.access_token == "at-1"));
}

#[tokio::test]
async fn test_sign_out_revokes_with_bearer() {
    let recorder = Arc::new(Recorder::default());
    let router = Router::new()
        .route(
            "/auth/v1/logout",
            post(|State(rec): State<Arc<Recorder>>, headers: HeaderMap| async move {
                rec.record("/auth/v1/logout", headers, Value::Null);
                StatusCode::NO_CONTENT
            }),
        )
        .with_state(recorder.clone());
    let base_url = serve(router).await;

    let provider = GoTrueIdentityProvider::new(&base_url, "anon-key").unwrap();
    provider.sign_out(&Session::new("at-1")).await.unwrap();

    let (_, headers, _) = recorder.last();
    assert_eq!(bearer(&headers).as_deref(), Some("Bearer at-1"));

    // A session without a token has nothing to revoke.
    provider.sign_out(&Session::new("")).await.unwrap();
    assert_eq!(recorder.count(), 1);
}
