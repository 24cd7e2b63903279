use tempfile::TempDir;

use super::*;
use crate::{
    db::{Database, GOAL_KEY, TASKS_KEY},
    error::StoreError,
    models::TaskStatus,
    params::{CreateGoal, CreateTask},
};

async fn test_storage() -> (TempDir, Storage) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let storage = StorageBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create storage");
    (temp_dir, storage)
}

/// Corrupts the blob stored under a key, bypassing the storage API.
fn corrupt_key(storage: &Storage, key: &str) {
    let mut db = Database::new(&storage.db_path).expect("Failed to open database");
    db.put_value(key, "{not json").expect("Failed to write");
}

#[tokio::test]
async fn test_malformed_goal_blob_degrades_to_absent() {
    let (_dir, storage) = test_storage().await;

    storage
        .create_goal(&CreateGoal {
            title: "Goal".to_string(),
            description: None,
            target_date: crate::ident::local_today(),
        })
        .await
        .expect("Failed to create goal");
    assert!(storage.has_goal().await);

    corrupt_key(&storage, GOAL_KEY);
    assert!(storage.goal().await.is_none());
    assert!(!storage.has_goal().await);
}

#[tokio::test]
async fn test_malformed_task_blob_degrades_to_empty() {
    let (_dir, storage) = test_storage().await;

    storage
        .create_task(&CreateTask {
            title: "Task".to_string(),
            ..CreateTask::default()
        })
        .await
        .expect("Failed to create task");

    corrupt_key(&storage, TASKS_KEY);
    assert!(storage.tasks().await.is_empty());
    assert_eq!(storage.task_stats().await.total, 0);
}

#[tokio::test]
async fn test_create_task_rejects_empty_title() {
    let (_dir, storage) = test_storage().await;

    let result = storage
        .create_task(&CreateTask {
            title: "   ".to_string(),
            ..CreateTask::default()
        })
        .await;
    assert!(matches!(
        result,
        Err(StoreError::InvalidInput { ref field, .. }) if field == "title"
    ));
}

#[tokio::test]
async fn test_delete_goal_is_idempotent() {
    let (_dir, storage) = test_storage().await;

    storage.delete_goal().await.expect("Failed to delete goal");
    storage.delete_goal().await.expect("Failed to delete goal");
    assert!(storage.goal().await.is_none());
}

#[tokio::test]
async fn test_seed_sample_tasks_only_populates_empty_storage() {
    let (_dir, storage) = test_storage().await;

    storage
        .seed_sample_tasks()
        .await
        .expect("Failed to seed tasks");
    let seeded = storage.tasks().await.len();
    assert!(seeded > 0);

    storage
        .seed_sample_tasks()
        .await
        .expect("Failed to seed tasks");
    assert_eq!(storage.tasks().await.len(), seeded);
}

#[tokio::test]
async fn test_toggle_skips_in_progress_on_both_paths() {
    let (_dir, storage) = test_storage().await;

    let task = storage
        .create_task(&CreateTask {
            title: "Working on it".to_string(),
            status: TaskStatus::InProgress,
            ..CreateTask::default()
        })
        .await
        .expect("Failed to create task");

    let toggled = storage
        .toggle_complete(&task.id)
        .await
        .expect("Failed to toggle")
        .expect("Task should exist");
    assert_eq!(toggled.status, TaskStatus::Completed);

    let toggled = storage
        .toggle_complete(&task.id)
        .await
        .expect("Failed to toggle")
        .expect("Task should exist");
    assert_eq!(toggled.status, TaskStatus::Pending);
}
