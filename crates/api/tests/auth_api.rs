//! HTTP-level integration tests for the authentication endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, seed_user};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_returns_tokens_and_user(pool: PgPool) {
    seed_user(&pool, "site-admin", "admin").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({"username": "site-admin", "password": "test-password-123"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["user"]["username"], "site-admin");
    assert_eq!(json["user"]["role"], "admin");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password_returns_401(pool: PgPool) {
    seed_user(&pool, "site-admin", "admin").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({"username": "site-admin", "password": "nope"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unknown_user_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({"username": "ghost", "password": "whatever"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_account_locks_after_repeated_failures(pool: PgPool) {
    seed_user(&pool, "site-admin", "admin").await;

    // Five wrong passwords trip the lockout threshold.
    for _ in 0..5 {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            "/api/v1/auth/login",
            None,
            serde_json::json!({"username": "site-admin", "password": "wrong"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even the correct password is rejected while locked.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({"username": "site-admin", "password": "test-password-123"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Refresh rotation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_rotates_the_token(pool: PgPool) {
    seed_user(&pool, "site-admin", "admin").await;

    let app = common::build_test_app(pool.clone());
    let login = body_json(
        post_json(
            app,
            "/api/v1/auth/login",
            None,
            serde_json::json!({"username": "site-admin", "password": "test-password-123"}),
        )
        .await,
    )
    .await;
    let refresh_token = login["refresh_token"].as_str().unwrap().to_string();

    // First refresh succeeds and returns a different token.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        None,
        serde_json::json!({"refresh_token": refresh_token}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    assert_ne!(refreshed["refresh_token"].as_str().unwrap(), refresh_token);

    // The used token is revoked: a second refresh with it fails.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        None,
        serde_json::json!({"refresh_token": refresh_token}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_the_session(pool: PgPool) {
    seed_user(&pool, "site-admin", "admin").await;

    let app = common::build_test_app(pool.clone());
    let login = body_json(
        post_json(
            app,
            "/api/v1/auth/login",
            None,
            serde_json::json!({"username": "site-admin", "password": "test-password-123"}),
        )
        .await,
    )
    .await;
    let access = login["access_token"].as_str().unwrap().to_string();
    let refresh = login["refresh_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/logout",
        Some(&access),
        serde_json::json!({"refresh_token": refresh}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        None,
        serde_json::json!({"refresh_token": refresh}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Profile / token enforcement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_returns_profile(pool: PgPool) {
    let (_, token) = seed_user(&pool, "lead-carpenter", "member").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/auth/me", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "lead-carpenter");
    assert_eq!(json["role"], "member");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/auth/me", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_garbage_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/auth/me", Some("not-a-jwt")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
