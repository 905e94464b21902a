//! Fixtures shared by the repository tests.

use std::sync::Arc;
use tempfile::TempDir;

use pennywise_core::users::{NewUser, UserRepositoryTrait};

use crate::db::{open, DbPool, WriteHandle};
use crate::users::UserRepository;

/// Opens a migrated database in a temp dir. The `TempDir` must be kept
/// alive for the duration of the test.
pub(crate) fn open_test_db() -> (Arc<DbPool>, WriteHandle, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let (pool, writer) =
        open(&db_path.to_string_lossy()).expect("Failed to open test database");
    (pool, writer, temp_dir)
}

/// Inserts a user and returns its id.
pub(crate) async fn create_test_user(pool: &Arc<DbPool>, writer: &WriteHandle, email: &str) -> String {
    let repo = UserRepository::new(pool.clone(), writer.clone());
    repo.create(NewUser {
        username: None,
        email: email.to_string(),
        password_hash: "hash".to_string(),
    })
    .await
    .expect("Failed to create test user")
    .id
}
