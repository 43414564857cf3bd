//! Integration tests for the Tasks domain
//!
//! These run against a real PostgreSQL via testcontainers to check what the
//! mock database cannot:
//! - `task_priority` enum ordering in `ORDER BY priority DESC`
//! - byte-wise `description` ordering from the `"C"` collation
//! - upsert semantics of `save`
//! - `update` never inserting a missing row
//!
//! Run with `cargo test -p domain_tasks -- --ignored` (requires Docker).

use chrono::NaiveDate;
use domain_tasks::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn create(name: String, priority: TaskPriority, description: String) -> CreateTask {
    CreateTask {
        name,
        description,
        completed: false,
        priority,
        due_date: None,
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_and_find_by_id() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("insert_and_find");

    let input = CreateTask {
        due_date: NaiveDate::from_ymd_opt(2026, 12, 31),
        ..create(
            builder.name("task", "main"),
            TaskPriority::Medium,
            builder.description(1),
        )
    };

    let created = repo.insert(input.clone()).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created, input.clone().into_task(created.id));

    let fetched = assert_some(repo.find_by_id(created.id).await.unwrap(), "task should exist");
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_lists_in_canonical_order() {
    let db = TestDatabase::new().await;
    let service = TaskService::new(PgTaskRepository::new(db.connection()));

    for (name, priority, description) in [
        ("A", TaskPriority::Low, "z"),
        ("B", TaskPriority::High, "a"),
        ("C", TaskPriority::High, "b"),
        ("D", TaskPriority::Medium, "m"),
        // Upper-case sorts before lower-case under the "C" collation
        ("E", TaskPriority::High, "Z"),
    ] {
        service
            .create_task(create(name.to_string(), priority, description.to_string()))
            .await
            .unwrap();
    }

    let tasks = service.list_tasks().await.unwrap();
    let names: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();

    assert_eq!(names, ["E", "B", "C", "D", "A"]);
    assert_sorted_desc(&tasks, |t| t.priority, "priority");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_save_overwrites_all_fields() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("save_overwrites");

    let created = repo
        .insert(create(
            builder.name("task", "before"),
            TaskPriority::Low,
            builder.description(1),
        ))
        .await
        .unwrap();

    let replacement = Task {
        id: created.id,
        name: builder.name("task", "after"),
        description: builder.description(2),
        completed: true,
        priority: TaskPriority::High,
        due_date: NaiveDate::from_ymd_opt(2027, 1, 1),
    };

    let saved = repo.save(replacement.clone()).await.unwrap();
    assert_eq!(saved, replacement);

    // Same content twice leaves the same state
    repo.save(replacement.clone()).await.unwrap();
    let sort = TaskService::<PgTaskRepository>::canonical_sort();
    let all = repo.find_all(&sort).await.unwrap();
    assert_eq!(all, vec![replacement]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_save_inserts_unknown_id() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("save_inserts");

    let task = create(
        builder.name("task", "explicit"),
        TaskPriority::Medium,
        builder.description(1),
    )
    .into_task(500);

    let saved = repo.save(task.clone()).await.unwrap();
    assert_eq!(saved, task);
    assert_eq!(repo.find_by_id(500).await.unwrap(), Some(task));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_by_id() {
    let db = TestDatabase::new().await;
    let service = TaskService::new(PgTaskRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("delete_by_id");

    let created = service
        .create_task(create(
            builder.name("task", "doomed"),
            TaskPriority::Low,
            builder.description(1),
        ))
        .await
        .unwrap();

    service.delete_task(created.id).await.unwrap();

    assert!(service.list_tasks().await.unwrap().is_empty());
    assert!(matches!(
        service.delete_task(created.id).await,
        Err(TaskError::NotFound(id)) if id == created.id
    ));

    db.truncate_tasks().await;
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_id_is_not_found() {
    let db = TestDatabase::new().await;
    let service = TaskService::new(PgTaskRepository::new(db.connection()));

    let ghost = create("ghost".to_string(), TaskPriority::Low, String::new()).into_task(9_999);
    let err = service.update_task(ghost).await.unwrap_err();

    assert!(matches!(err, TaskError::NotFound(9_999)));
    assert!(service.list_tasks().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_of_deleted_row_does_not_reinsert() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_deleted");

    let created = repo
        .insert(create(
            builder.name("task", "doomed"),
            TaskPriority::High,
            builder.description(1),
        ))
        .await
        .unwrap();
    assert!(repo.delete_by_id(created.id).await.unwrap());

    let toggled = Task {
        completed: true,
        ..created.clone()
    };
    assert!(repo.update(toggled).await.unwrap().is_none());
    assert!(repo.find_by_id(created.id).await.unwrap().is_none());

    db.truncate_tasks().await;
}
