use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use rax_register::Server;
use rax_register::auth::{
    CredentialStore, MAX_PASSWORD_BYTES, MIN_BCRYPT_COST, MemoryCredentialStore, PasswordHasher,
};
use rax_register::config::AppConfig;

// Helper to build the app over a fresh store
fn setup_app() -> (Router, Arc<MemoryCredentialStore>) {
    setup_app_with_cost(MIN_BCRYPT_COST)
}

fn setup_app_with_cost(bcrypt_cost: u32) -> (Router, Arc<MemoryCredentialStore>) {
    let store = Arc::new(MemoryCredentialStore::new());
    let config = AppConfig {
        bcrypt_cost,
        ..AppConfig::default()
    };
    let router = Server::router(&config, store.clone()).unwrap();
    (router, store)
}

// Helper to send a request and decode the JSON response
async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn register_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn credentials(username: &str, password: &str) -> Request<Body> {
    register_request(json!({ "username": username, "password": password }).to_string())
}

#[tokio::test]
async fn test_root_endpoint() {
    let (router, _) = setup_app();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Registration service is running" }));
}

#[tokio::test]
async fn test_register_then_duplicate() {
    let (router, store) = setup_app();

    let (status, body) = send(&router, credentials("alice", "hunter2")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({ "message": "User registered successfully", "username": "alice" })
    );
    assert!(store.exists("alice").await.unwrap());
    let original = store.get("alice").await.unwrap().unwrap();

    let (status, body) = send(&router, credentials("alice", "hunter2")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "detail": "Username already registered" }));

    let after = store.get("alice").await.unwrap().unwrap();
    assert_eq!(original, after);
}

#[tokio::test]
async fn test_response_never_contains_credentials() {
    let (router, store) = setup_app();
    let (_, body) = send(&router, credentials("carol", "s3cret-pass")).await;

    let rendered = body.to_string();
    let hash = store.get("carol").await.unwrap().unwrap().hashed_password;
    assert!(!rendered.contains("s3cret-pass"));
    assert!(!rendered.contains(&hash));
}

#[tokio::test]
async fn test_stored_hash_verifies() {
    let (router, store) = setup_app();
    send(&router, credentials("dave", "correct horse")).await;
    send(&router, credentials("erin", "correct horse")).await;

    let dave = store.get("dave").await.unwrap().unwrap();
    let erin = store.get("erin").await.unwrap().unwrap();
    let hasher = PasswordHasher::new(MIN_BCRYPT_COST);

    assert_ne!(dave.hashed_password, "correct horse");
    assert_ne!(dave.hashed_password, erin.hashed_password);
    assert!(hasher.verify("correct horse", &dave.hashed_password).unwrap());
    assert!(!hasher.verify("battery staple", &dave.hashed_password).unwrap());
}

#[tokio::test]
async fn test_hashing_failure_is_internal_error() {
    // bcrypt refuses a cost below its minimum, so every hash fails
    let (router, store) = setup_app_with_cost(MIN_BCRYPT_COST - 1);
    let (status, body) = send(&router, credentials("alice", "hunter2")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "detail": "Internal server error" }));
    assert_eq!(store.len().await.unwrap(), 0);
}

#[tokio::test]
async fn test_long_password_is_unprocessable() {
    let (router, store) = setup_app();
    let password = format!("{}-original-secret", "a".repeat(MAX_PASSWORD_BYTES));
    let (status, body) = send(&router, credentials("alice", &password)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "password"]));
    assert_eq!(body["detail"][0]["type"], "string_too_long");
    assert_eq!(store.len().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shared_prefix_password_does_not_verify() {
    let (router, store) = setup_app();
    let password = "a".repeat(MAX_PASSWORD_BYTES);
    let (status, _) = send(&router, credentials("alice", &password)).await;
    assert_eq!(status, StatusCode::CREATED);

    let record = store.get("alice").await.unwrap().unwrap();
    let hasher = PasswordHasher::new(MIN_BCRYPT_COST);
    let other = format!("{password}-totally-different");
    assert!(hasher.verify(&password, &record.hashed_password).unwrap());
    assert!(!hasher.verify(&other, &record.hashed_password).unwrap());
}

#[tokio::test]
async fn test_missing_password_is_unprocessable() {
    let (router, store) = setup_app();
    let (status, body) = send(&router, register_request(r#"{"username": "alice"}"#)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "password"]));
    assert_eq!(body["detail"][0]["type"], "missing");
    assert_eq!(store.len().await.unwrap(), 0);
}

#[tokio::test]
async fn test_wrong_types_enumerated() {
    let (router, _) = setup_app();
    let (status, body) = send(
        &router,
        register_request(r#"{"username": 7, "password": null}"#),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let detail = body["detail"].as_array().unwrap();
    assert_eq!(detail.len(), 2);
    assert_eq!(detail[0]["loc"], json!(["body", "username"]));
    assert_eq!(detail[1]["loc"], json!(["body", "password"]));
    assert!(detail.iter().all(|d| d["type"] == "string_type"));
}

#[tokio::test]
async fn test_invalid_json_is_unprocessable() {
    let (router, _) = setup_app();
    let (status, body) = send(&router, register_request("{not json")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "json_invalid");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations() {
    let (router, store) = setup_app();
    let attempts = 12;

    let handles: Vec<_> = (0..attempts)
        .map(|i| {
            let router = router.clone();
            tokio::spawn(async move {
                send(&router, credentials("racer", &format!("pw-{i}"))).await.0
            })
        })
        .collect();

    let mut created = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::BAD_REQUEST => rejected += 1,
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(rejected, attempts - 1);
    assert_eq!(store.len().await.unwrap(), 1);
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let (router, _) = setup_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/register")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type,x-custom")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "content-type,x-custom"
    );
}

#[tokio::test]
async fn test_cors_ignores_unknown_origin() {
    let (router, _) = setup_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/register")
        .header(header::ORIGIN, "http://evil.example")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "username": "frank", "password": "pw" }).to_string(),
        ))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
