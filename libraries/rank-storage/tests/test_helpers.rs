//! Test helpers and fixtures for catalog integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! so migrations, foreign keys and partial indexes behave as in production.

#![allow(dead_code)]

use rank_core::{ArtistCredit, TrackRecord};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = rank_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        rank_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Test fixture: record with secondary artists given by name
pub fn record_with_others(
    title: &str,
    album: &str,
    primary: &str,
    others: &[&str],
) -> TrackRecord {
    let mut record = TrackRecord::new(title, album, primary);
    for name in others {
        record = record.with_other_artist_credit(ArtistCredit::new(*name));
    }
    record
}

/// Count rows of a table
pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}

/// Make every insert of an album titled `title` fail
///
/// Used to break a reconciliation halfway through its writes.
pub async fn fail_album_inserts(pool: &SqlitePool, title: &str) {
    let sql = format!(
        "CREATE TRIGGER fail_album_insert BEFORE INSERT ON albums
         WHEN NEW.title = '{}'
         BEGIN
             SELECT RAISE(ABORT, 'album insert refused');
         END",
        title.replace('\'', "''")
    );

    sqlx::query(&sql)
        .execute(pool)
        .await
        .expect("Failed to create trigger");
}
