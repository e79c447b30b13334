//! Error envelope and middleware behaviour tests.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, seed_user};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_route_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/nonexistent", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_not_found_envelope_shape(pool: PgPool) {
    let (_, admin) = seed_user(&pool, "boss", "admin").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/projects/424242", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Project with id 424242"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_validation_envelope_shape(pool: PgPool) {
    let (_, admin) = seed_user(&pool, "boss", "admin").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/projects",
        Some(&admin),
        serde_json::json!({
            "name": "Bad Progress",
            "start_date": "2024-07-01",
            "end_date": "2024-07-10",
            "progress": 250,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_forbidden_envelope_shape(pool: PgPool) {
    let (_, member) = seed_user(&pool, "carpenter", "member").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/admin/users", Some(&member)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_request_id_header_is_set(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health", None).await;

    assert!(
        response.headers().contains_key("x-request-id"),
        "request id middleware should stamp responses"
    );
}
