//! Shared helpers: an in-process app over the in-memory store, plus request
//! plumbing so tests read as scenario steps.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use storefront_api::routes;
use storefront_api::state::AppState;
use storefront_api::store::MemoryStore;

pub fn test_app() -> Router {
    routes::app(AppState::new(Arc::new(MemoryStore::new())))
}

/// App plus a handle on its store, for tests that mutate storage behind the
/// API's back (e.g. deleting a token's subject).
#[allow(dead_code)]
pub fn test_app_with_store() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = routes::app(AppState::new(store.clone()));
    (app, store)
}

pub async fn send(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

/// Sign up a regular (non-admin) user; returns (token, user id).
#[allow(dead_code)]
pub async fn signup_user(app: &Router, name: &str, email: &str, password: &str) -> (String, String) {
    let (status, body) = send(
        app,
        "POST",
        "/auth/signup",
        None,
        Some(json!({"name": name, "email": email, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");

    let token = body["data"]["token"].as_str().expect("token").to_string();
    let id = body["data"]["user"]["id"].as_str().expect("user id").to_string();
    (token, id)
}

/// Seed demo data and log in as the bootstrap admin; returns its token.
#[allow(dead_code)]
pub async fn admin_token(app: &Router) -> String {
    let (status, _) = send(app, "POST", "/seed", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "admin@shop.com", "password": "admin123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "admin login failed: {body}");
    body["data"]["token"].as_str().expect("token").to_string()
}
