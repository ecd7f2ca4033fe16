//! Integration tests for Tasks domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Queries and ordering work against the migrated schema
//! - The unique title index is enforced and mapped to a conflict
//! - The service behaves the same over Postgres as over memory
//!
//! They need Docker: `cargo test -p domain_tasks -- --ignored`

use chrono::{Duration, Utc};
use domain_tasks::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};
use uuid::Uuid;

fn new_task(title: String, created_offset_secs: i64) -> Task {
    let mut task = Task::new(
        title,
        "Integration test task".to_string(),
        Utc::now() + Duration::days(1),
        TaskStatus::Pending,
    );
    task.created_at += Duration::seconds(created_offset_secs);
    task
}

fn request(title: String, due_in: Duration) -> TaskRequest {
    TaskRequest {
        title,
        description: "Integration test task".to_string(),
        due_date: Utc::now() + due_in,
        status: TaskStatus::Pending,
    }
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_add_and_get_task() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("add_and_get");

    let created = repo.add(new_task(builder.title("main"), 0)).await.unwrap();

    assert_eq!(created.title, builder.title("main"));
    assert_eq!(created.status, TaskStatus::Pending);

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "task should exist");

    assert_uuid_eq(retrieved.id, created.id, "retrieved task id");
    assert_eq!(retrieved.title, created.title);
    assert_eq!(retrieved.created_at, created.created_at);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_title_constraint() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("duplicate_title");

    repo.add(new_task(builder.title("dup"), 0)).await.unwrap();
    let result = repo.add(new_task(builder.title("dup"), 0)).await;

    assert!(
        matches!(result, Err(TaskError::DuplicateTitle(_))),
        "second insert should hit the unique index, got {result:?}"
    );
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_exists_by_title() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("exists_by_title");

    repo.add(new_task(builder.title("here"), 0)).await.unwrap();

    assert!(repo.exists_by_title(&builder.title("here")).await.unwrap());
    assert!(!repo.exists_by_title(&builder.title("gone")).await.unwrap());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_list_orders_newest_first() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("list_order");

    for i in 0..4 {
        repo.add(new_task(builder.title(&i.to_string()), i))
            .await
            .unwrap();
    }

    let page = repo.list(1, 2).await.unwrap();
    let titles: Vec<_> = page.into_iter().map(|t| t.title).collect();

    assert_eq!(titles, vec![builder.title("2"), builder.title("1")]);
    assert_eq!(repo.count().await.unwrap(), 4);
    assert!(repo.list(0, 0).await.unwrap().is_empty());
    assert!(repo.list(u64::MAX, u64::MAX).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_task() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_task");

    let mut task = repo.add(new_task(builder.title("before"), 0)).await.unwrap();
    task.update_status(TaskStatus::Completed);
    task.title = builder.title("after");

    let updated = repo.update(task.clone()).await.unwrap();
    assert_eq!(updated.status, TaskStatus::Completed);

    let stored = assert_some(repo.get_by_id(task.id).await.unwrap(), "updated task");
    assert_eq!(stored.title, builder.title("after"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_task() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_missing");

    let ghost = new_task(builder.title("ghost"), 0);
    let result = repo.update(ghost.clone()).await;

    assert!(matches!(result, Err(TaskError::NotFound(id)) if id == ghost.id));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_task() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("delete_task");

    let created = repo.add(new_task(builder.title("bye"), 0)).await.unwrap();

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(Uuid::new_v4()).await.unwrap());
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_create_then_conflict() {
    let db = TestDatabase::new().await;
    let service = TaskService::new(PgTaskRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("service_conflict");

    let first = service
        .create_task(request(builder.title("spec"), Duration::days(1)))
        .await
        .unwrap();
    let second = service
        .create_task(request(builder.title("spec"), Duration::days(2)))
        .await;

    assert_eq!(first.title, builder.title("spec"));
    assert!(matches!(second, Err(TaskError::DuplicateTitle(_))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_update_rejects_past_due_date() {
    let db = TestDatabase::new().await;
    let service = TaskService::new(PgTaskRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("service_past_due");

    let created = service
        .create_task(request(builder.title("spec"), Duration::days(1)))
        .await
        .unwrap();

    let result = service
        .update_task(created.id, request(builder.title("spec"), -Duration::days(1)))
        .await;
    assert!(matches!(
        result,
        Err(TaskError::Validation(TaskViolation::PastDueDate))
    ));

    let stored = service.get_task(created.id).await.unwrap();
    assert_eq!(stored.due_date, created.due_date);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_list_and_delete() {
    let db = TestDatabase::new().await;
    let service = TaskService::new(PgTaskRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("service_list_delete");

    let created = service
        .create_task(request(builder.title("one"), Duration::days(1)))
        .await
        .unwrap();

    let page = service.list_tasks(ListTasksQuery::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_uuid_eq(page.items[0].id, created.id, "listed task");

    service.delete_task(created.id).await.unwrap();
    assert!(matches!(
        service.get_task(created.id).await,
        Err(TaskError::NotFound(_))
    ));
}
