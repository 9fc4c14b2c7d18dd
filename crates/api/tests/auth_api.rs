//! HTTP-level integration tests for registration, login, token refresh,
//! and logout.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_auth, post_json};
use sqlx::PgPool;

async fn register(app: axum::Router, email: &str, password: &str) -> axum::response::Response {
    let body = serde_json::json!({
        "email": email,
        "password": password,
        "full_name": "Alice Example",
    });
    post_json(app, "/api/v1/auth/register", body).await
}

async fn login(app: axum::Router, email: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_account(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = register(app, "Alice@Example.com", "a-strong-password").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    // Registration logs the account in: same token pair as login.
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert!(json["expires_in"].is_number());
    // Email is normalized to lowercase on the way in.
    assert_eq!(json["user"]["email"], "alice@example.com");
    assert_eq!(json["user"]["role"], "user");
    assert!(json["user"].get("password_hash").is_none(), "hash must never leak");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_duplicate_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let first = register(app.clone(), "alice@example.com", "a-strong-password").await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = register(app, "ALICE@example.com", "another-password").await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_bad_input(pool: PgPool) {
    let app = common::build_test_app(pool);

    let no_at = register(app.clone(), "not-an-email", "a-strong-password").await;
    assert_eq!(no_at.status(), StatusCode::BAD_REQUEST);

    let short = register(app, "bob@example.com", "short").await;
    assert_eq!(short.status(), StatusCode::BAD_REQUEST);
    let json = body_json(short).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_tokens(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "alice@example.com", "a-strong-password").await;

    let json = login(app, "alice@example.com", "a-strong-password").await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["email"], "alice@example.com");
    assert_eq!(json["user"]["role"], "user");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_rejects_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "alice@example.com", "a-strong-password").await;

    let body = serde_json::json!({ "email": "alice@example.com", "password": "wrong" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_rejects_unknown_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "ghost@example.com", "password": "whatever1" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_the_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "alice@example.com", "a-strong-password").await;
    let json = login(app.clone(), "alice@example.com", "a-strong-password").await;
    let old_refresh = json["refresh_token"].as_str().unwrap().to_string();

    let body = serde_json::json!({ "refresh_token": old_refresh });
    let response = post_json(app.clone(), "/api/v1/auth/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    assert_ne!(refreshed["refresh_token"], old_refresh.as_str());

    // The rotated-out token is dead.
    let replay = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_all_sessions(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "alice@example.com", "a-strong-password").await;
    let json = login(app.clone(), "alice@example.com", "a-strong-password").await;
    let access = json["access_token"].as_str().unwrap().to_string();
    let refresh = json["refresh_token"].as_str().unwrap().to_string();

    let response = post_auth(app.clone(), "/api/v1/auth/logout", &access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = serde_json::json!({ "refresh_token": refresh });
    let replay = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_requires_and_returns_profile(pool: PgPool) {
    let (user, token) = common::create_user_with_token(&pool, "alice@example.com").await;
    let app = common::build_test_app(pool);

    let anonymous = common::get(app.clone(), "/api/v1/auth/me").await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], user.id);
    assert_eq!(json["email"], "alice@example.com");
    assert!(json.get("password_hash").is_none(), "hash must never leak");
}
