//! Integration tests for entity CRUD operations.
//!
//! Exercises the repository layer against a real database:
//! - Create full hierarchy (project -> phase -> task -> milestone/media)
//! - Cascade delete behaviour
//! - Unique constraint violations
//! - Partial update semantics
//! - Phase assignment

use chrono::NaiveDate;
use sqlx::PgPool;

use sitetrack_db::models::media_file::CreateMediaFile;
use sitetrack_db::models::milestone::CreateMilestone;
use sitetrack_db::models::phase::CreatePhase;
use sitetrack_db::models::project::{CreateProject, UpdateProject};
use sitetrack_db::models::status::{MediaKind, MilestoneKind, WorkStatus};
use sitetrack_db::models::task::CreateTask;
use sitetrack_db::models::user::CreateUser;
use sitetrack_db::repositories::{
    MediaRepo, MilestoneRepo, PhaseRepo, ProjectRepo, RoleRepo, TaskRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: None,
        start_date: date(2024, 7, 1),
        end_date: date(2024, 7, 10),
        status: None,
        progress: None,
    }
}

fn new_phase(name: &str) -> CreatePhase {
    CreatePhase {
        name: name.to_string(),
        description: None,
        start_date: date(2024, 7, 1),
        end_date: date(2024, 7, 5),
        color: None,
    }
}

fn new_task(name: &str, phase_id: Option<i64>) -> CreateTask {
    CreateTask {
        name: name.to_string(),
        trade: "General".to_string(),
        priority: None,
        status: None,
        progress: None,
        phase_id,
        start_date: Some(date(2024, 7, 3)),
        end_date: Some(date(2024, 7, 5)),
        due_date: None,
    }
}

async fn new_member(pool: &PgPool, username: &str) -> i64 {
    let role = RoleRepo::find_by_name(pool, "member")
        .await
        .unwrap()
        .expect("member role is seeded");
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            display_name: username.to_string(),
            password_hash: "$argon2id$test-placeholder".to_string(),
            role_id: role.id,
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Hierarchy
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn create_full_hierarchy(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Riverside Plaza"))
        .await
        .unwrap();
    assert_eq!(project.status, WorkStatus::Planned);
    assert_eq!(project.progress, 0);

    let phase = PhaseRepo::create(&pool, project.id, &new_phase("Foundation"))
        .await
        .unwrap();
    assert_eq!(phase.position, 0);
    assert_eq!(phase.color, "#3b82f6");

    let task = TaskRepo::create(&pool, project.id, &project.name, &new_task("Pour footings", Some(phase.id)))
        .await
        .unwrap();
    assert_eq!(task.project_name, "Riverside Plaza");
    assert_eq!(task.phase_id, Some(phase.id));
    assert_eq!(task.status, WorkStatus::Planned);

    let milestone = MilestoneRepo::create(
        &pool,
        task.id,
        &CreateMilestone {
            name: "Footing inspection".to_string(),
            kind: MilestoneKind::Inspection,
            date: date(2024, 7, 4),
        },
    )
    .await
    .unwrap();
    assert_eq!(milestone.kind, MilestoneKind::Inspection);

    let uploader = new_member(&pool, "foreman").await;
    let media = MediaRepo::create(
        &pool,
        task.id,
        uploader,
        "foreman",
        &CreateMediaFile {
            name: "footings.jpg".to_string(),
            url: "https://files.example.com/footings.jpg".to_string(),
            kind: MediaKind::Image,
            description: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(media.uploader_name, "foreman");
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_project_name_is_rejected(pool: PgPool) {
    ProjectRepo::create(&pool, &new_project("Riverside Plaza"))
        .await
        .unwrap();
    let result = ProjectRepo::create(&pool, &new_project("Riverside Plaza")).await;
    assert!(result.is_err(), "unique constraint must reject duplicate");
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_project_cascades_to_children(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Doomed"))
        .await
        .unwrap();
    let phase = PhaseRepo::create(&pool, project.id, &new_phase("Foundation"))
        .await
        .unwrap();
    let task = TaskRepo::create(&pool, project.id, &project.name, &new_task("A", Some(phase.id)))
        .await
        .unwrap();

    assert!(ProjectRepo::delete(&pool, project.id).await.unwrap());

    assert!(PhaseRepo::find_by_id(&pool, phase.id).await.unwrap().is_none());
    assert!(TaskRepo::find_by_id(&pool, task.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_missing_project_returns_false(pool: PgPool) {
    assert!(!ProjectRepo::delete(&pool, 999_999).await.unwrap());
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn partial_update_leaves_other_fields_untouched(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Original"))
        .await
        .unwrap();

    let updated = ProjectRepo::update(
        &pool,
        project.id,
        &UpdateProject {
            name: Some("Renamed".to_string()),
            description: None,
            start_date: None,
            end_date: None,
            status: Some(WorkStatus::InProgress),
            progress: None,
        },
    )
    .await
    .unwrap()
    .expect("project exists");

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.status, WorkStatus::InProgress);
    assert_eq!(updated.start_date, project.start_date);
    assert_eq!(updated.progress, 0);
}

// ---------------------------------------------------------------------------
// Task ordering and phase assignment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn tasks_list_in_natural_load_order(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Ordered"))
        .await
        .unwrap();
    for name in ["first", "second", "third"] {
        TaskRepo::create(&pool, project.id, &project.name, &new_task(name, None))
            .await
            .unwrap();
    }

    let tasks = TaskRepo::list_by_project(&pool, project.id).await.unwrap();
    let names: Vec<_> = tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["first", "second", "third"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn set_phase_assigns_and_clears(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Assignable"))
        .await
        .unwrap();
    let phase = PhaseRepo::create(&pool, project.id, &new_phase("Foundation"))
        .await
        .unwrap();
    let task = TaskRepo::create(&pool, project.id, &project.name, &new_task("A", None))
        .await
        .unwrap();
    assert_eq!(task.phase_id, None);

    let assigned = TaskRepo::set_phase(&pool, task.id, Some(phase.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assigned.phase_id, Some(phase.id));

    let cleared = TaskRepo::set_phase(&pool, task.id, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.phase_id, None);
}
