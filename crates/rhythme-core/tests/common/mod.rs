use rhythme_core::StorageBuilder;
use tempfile::TempDir;

/// Helper function to create a test storage instance
pub async fn create_test_storage() -> (TempDir, rhythme_core::Storage) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let storage = StorageBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create storage");
    (temp_dir, storage)
}
