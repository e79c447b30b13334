//! HTTP-level integration tests for the progress-update operation, its
//! mandatory comment, and the status divergence the general edit allows.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, put_json, seed_user};
use sqlx::PgPool;

async fn seed_project_task(pool: &PgPool, admin: &str) -> (i64, i64) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/projects",
        Some(admin),
        serde_json::json!({
            "name": "Progress Site",
            "start_date": "2024-07-01",
            "end_date": "2024-07-31",
        }),
    )
    .await;
    let project = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project}/tasks"),
        Some(admin),
        serde_json::json!({"name": "Hang drywall", "trade": "Drywall"}),
    )
    .await;
    let task = body_json(response).await["id"].as_i64().unwrap();
    (project, task)
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_progress_update_derives_status_and_appends_comment(pool: PgPool) {
    let (_, admin) = seed_user(&pool, "boss", "admin").await;
    let (_, task) = seed_project_task(&pool, &admin).await;

    // 0 -> 40: in-progress.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/tasks/{task}/progress"),
        Some(&admin),
        serde_json::json!({"new_progress": 40, "comment": "First half hung"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["task"]["progress"], 40);
    assert_eq!(json["task"]["status"], "in-progress");
    assert_eq!(json["comment"]["previous_progress"], 0);
    assert_eq!(json["comment"]["new_progress"], 40);

    // 40 -> 100: completed, comment captures the 40 -> 100 transition.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/tasks/{task}/progress"),
        Some(&admin),
        serde_json::json!({"new_progress": 100, "comment": "Finished and sanded"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["task"]["status"], "completed");
    assert_eq!(json["comment"]["previous_progress"], 40);
    assert_eq!(json["comment"]["new_progress"], 100);

    // History lists both comments, oldest first.
    let app = common::build_test_app(pool);
    let history = body_json(
        get(app, &format!("/api/v1/tasks/{task}/comments"), Some(&admin)).await,
    )
    .await;
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["new_progress"], 40);
    assert_eq!(entries[1]["new_progress"], 100);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_comment_is_rejected_before_any_write(pool: PgPool) {
    let (_, admin) = seed_user(&pool, "boss", "admin").await;
    let (_, task) = seed_project_task(&pool, &admin).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/tasks/{task}/progress"),
        Some(&admin),
        serde_json::json!({"new_progress": 50, "comment": "   "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was written: task untouched, history empty.
    let app = common::build_test_app(pool.clone());
    let task_json = body_json(get(app, &format!("/api/v1/tasks/{task}"), Some(&admin)).await).await;
    assert_eq!(task_json["progress"], 0);
    assert_eq!(task_json["status"], "planned");

    let app = common::build_test_app(pool);
    let history = body_json(
        get(app, &format!("/api/v1/tasks/{task}/comments"), Some(&admin)).await,
    )
    .await;
    assert!(history.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_out_of_range_progress_is_rejected(pool: PgPool) {
    let (_, admin) = seed_user(&pool, "boss", "admin").await;
    let (_, task) = seed_project_task(&pool, &admin).await;

    for bad in [-5, 101] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            &format!("/api/v1/tasks/{task}/progress"),
            Some(&admin),
            serde_json::json!({"new_progress": bad, "comment": "out of range"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_general_edit_does_not_reconcile_status_and_progress(pool: PgPool) {
    let (_, admin) = seed_user(&pool, "boss", "admin").await;
    let (_, task) = seed_project_task(&pool, &admin).await;

    // completed at 40% via the general edit: allowed and preserved.
    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/tasks/{task}"),
        Some(&admin),
        serde_json::json!({"status": "completed", "progress": 40}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "completed");
    assert_eq!(json["progress"], 40);

    // And no comment was appended by this path.
    let app = common::build_test_app(pool);
    let history = body_json(
        get(app, &format!("/api/v1/tasks/{task}/comments"), Some(&admin)).await,
    )
    .await;
    assert!(history.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_client_cannot_update_progress(pool: PgPool) {
    let (_, admin) = seed_user(&pool, "boss", "admin").await;
    let (_, client) = seed_user(&pool, "owner-rep", "client").await;
    let (_, task) = seed_project_task(&pool, &admin).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/tasks/{task}/progress"),
        Some(&client),
        serde_json::json!({"new_progress": 10, "comment": "not allowed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
