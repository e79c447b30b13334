//! Shared harness for HTTP-level integration tests.
//!
//! Builds the application router through the same [`build_app_router`] the
//! production binary uses, so tests exercise the full middleware stack, and
//! provides request/seed helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use sitetrack_api::auth::jwt::{generate_access_token, JwtConfig};
use sitetrack_api::auth::password::hash_password;
use sitetrack_api::config::ServerConfig;
use sitetrack_api::router::build_app_router;
use sitetrack_api::state::AppState;
use sitetrack_db::models::user::CreateUser;
use sitetrack_db::repositories::{RoleRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Create a user with the given role and return `(user_id, bearer_token)`.
///
/// The token is signed with the same secret `build_test_app` configures, so
/// it is accepted by the router under test. Password is fixed to
/// `"test-password-123"` for login-flow tests.
pub async fn seed_user(pool: &PgPool, username: &str, role: &str) -> (i64, String) {
    let role_row = RoleRepo::find_by_name(pool, role)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("role {role} is seeded"));

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            display_name: username.to_string(),
            password_hash: hash_password("test-password-123").unwrap(),
            role_id: role_row.id,
        },
    )
    .await
    .unwrap();

    let token = generate_access_token(user.id, role, &test_config().jwt).unwrap();
    (user.id, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, "GET", uri, token, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "POST", uri, token, Some(body)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "PUT", uri, token, Some(body)).await
}

pub async fn patch_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "PATCH", uri, token, Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, "DELETE", uri, token, None).await
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a status and return the parsed body for further checks.
pub async fn expect_status(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
