//! Integration tests for the phase `position` invariant: dense 0..n-1 per
//! project after create, reorder, and delete.

use chrono::NaiveDate;
use sqlx::PgPool;

use sitetrack_db::models::phase::CreatePhase;
use sitetrack_db::models::project::CreateProject;
use sitetrack_db::models::task::CreateTask;
use sitetrack_db::repositories::{PhaseRepo, ProjectRepo, TaskRepo};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn project_with_phases(pool: &PgPool, names: &[&str]) -> (i64, Vec<i64>) {
    let project = ProjectRepo::create(
        pool,
        &CreateProject {
            name: "Sequenced".to_string(),
            description: None,
            start_date: date(2024, 7, 1),
            end_date: date(2024, 9, 30),
            status: None,
            progress: None,
        },
    )
    .await
    .unwrap();

    let mut ids = Vec::new();
    for name in names {
        let phase = PhaseRepo::create(
            pool,
            project.id,
            &CreatePhase {
                name: (*name).to_string(),
                description: None,
                start_date: date(2024, 7, 1),
                end_date: date(2024, 7, 31),
                color: None,
            },
        )
        .await
        .unwrap();
        ids.push(phase.id);
    }
    (project.id, ids)
}

async fn positions(pool: &PgPool, project_id: i64) -> Vec<(String, i32)> {
    PhaseRepo::list_by_project(pool, project_id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| (p.name, p.position))
        .collect()
}

#[sqlx::test(migrations = "./migrations")]
async fn created_phases_append_densely(pool: PgPool) {
    let (project_id, _) = project_with_phases(&pool, &["Foundation", "Framing", "Finishes"]).await;

    assert_eq!(
        positions(&pool, project_id).await,
        vec![
            ("Foundation".to_string(), 0),
            ("Framing".to_string(), 1),
            ("Finishes".to_string(), 2),
        ]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn reorder_rewrites_positions_densely(pool: PgPool) {
    let (project_id, ids) = project_with_phases(&pool, &["Foundation", "Framing", "Finishes"]).await;

    PhaseRepo::reorder(&pool, project_id, &[ids[2], ids[0], ids[1]])
        .await
        .unwrap();

    assert_eq!(
        positions(&pool, project_id).await,
        vec![
            ("Finishes".to_string(), 0),
            ("Foundation".to_string(), 1),
            ("Framing".to_string(), 2),
        ]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_middle_phase_resequences_survivors(pool: PgPool) {
    let (project_id, ids) = project_with_phases(&pool, &["Foundation", "Framing", "Finishes"]).await;

    assert!(PhaseRepo::delete(&pool, ids[1]).await.unwrap());

    assert_eq!(
        positions(&pool, project_id).await,
        vec![("Foundation".to_string(), 0), ("Finishes".to_string(), 1)]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_phase_unassigns_its_tasks(pool: PgPool) {
    let (project_id, ids) = project_with_phases(&pool, &["Foundation", "Framing"]).await;

    let task = TaskRepo::create(
        &pool,
        project_id,
        "Sequenced",
        &CreateTask {
            name: "Pour footings".to_string(),
            trade: "Concrete".to_string(),
            priority: None,
            status: None,
            progress: None,
            phase_id: Some(ids[0]),
            start_date: None,
            end_date: None,
            due_date: Some(date(2024, 7, 4)),
        },
    )
    .await
    .unwrap();

    assert!(PhaseRepo::delete(&pool, ids[0]).await.unwrap());

    let task = TaskRepo::find_by_id(&pool, task.id).await.unwrap().unwrap();
    assert_eq!(task.phase_id, None, "task should fall back to unassigned");
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_missing_phase_returns_false(pool: PgPool) {
    assert!(!PhaseRepo::delete(&pool, 999_999).await.unwrap());
}
