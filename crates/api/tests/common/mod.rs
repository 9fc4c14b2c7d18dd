//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the production router (same middleware stack as `main.rs`) on
//! top of a per-test database and drives it with `tower::ServiceExt`.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use tempo_api::auth::jwt::{generate_access_token, JwtConfig};
use tempo_api::auth::password::hash_password;
use tempo_api::config::ServerConfig;
use tempo_api::router::build_app_router;
use tempo_api::state::AppState;
use tempo_db::models::user::{CreateUser, User};
use tempo_db::repositories::UserRepo;
use tempo_reports::{ExportQueue, PgExportQueue};

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-with-plenty-of-entropy".to_string(),
            access_token_expiry_mins: 30,
            refresh_token_expiry_days: 14,
        },
    }
}

/// Build the full application router with the database-backed export
/// queue. Mirrors `main.rs` so tests exercise the production middleware
/// stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let queue = Arc::new(PgExportQueue::new(pool.clone()));
    build_test_app_with_queue(pool, queue)
}

/// Like [`build_test_app`] but with an injected queue backend, so tests
/// can exercise the enqueue-failure path.
pub fn build_test_app_with_queue(pool: PgPool, queue: Arc<dyn ExportQueue>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        export_queue: queue,
    };
    build_app_router(state, &config)
}

/// Insert a user directly and return it together with a valid access
/// token, skipping the login round trip.
pub async fn create_user_with_token(pool: &PgPool, email: &str) -> (User, String) {
    let password_hash = hash_password("integration-password").expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            full_name: Some("Test User".to_string()),
            password_hash,
            timezone: "UTC".to_string(),
        },
    )
    .await
    .expect("user creation should succeed");

    let token = generate_access_token(user.id, user.role(), &test_config().jwt)
        .expect("token generation should succeed");
    (user, token)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };
    app.oneshot(request).await.expect("request should not fail")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Some(token)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), Some(token)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), Some(token)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body), Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, Some(token)).await
}

/// Collect and parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
