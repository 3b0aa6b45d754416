//! Rank My Music Storage
//!
//! `SQLite` catalog for Rank My Music, and the reconciliation engine that
//! keeps it free of duplicate tracks, artists and albums.
//!
//! # Architecture
//!
//! - **Entity Store** (`identity`, `artists`, `albums`): get-or-create by
//!   identity key, external identifier first
//! - **Association Manager** (`associations`): idempotent track↔artist,
//!   track↔album and album↔artist links
//! - **Catalog Reconciler** (`reconcile`): decides, per input record, what
//!   already exists and what must be added
//! - **Transaction Coordinator** (`transaction`): one atomic unit per record
//!
//! # Example
//!
//! ```rust,no_run
//! use rank_core::{CatalogStore, TrackRecord};
//! use rank_storage::{create_pool, run_migrations, LocalCatalog};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://ranked_music.db").await?;
//! run_migrations(&pool).await?;
//!
//! let catalog = LocalCatalog::new(pool);
//! let outcome = catalog
//!     .reconcile(&TrackRecord::new("Winter", "Little Earthquakes", "Tori Amos"))
//!     .await?;
//! println!("track {} -> {:?}", outcome.track_id, outcome.status);
//! # Ok(())
//! # }
//! ```

mod context;
mod identity;
mod transaction;

// Vertical slices
pub mod albums;
pub mod artists;
pub mod associations;
pub mod reconcile;
pub mod stats;
pub mod tracks;

pub use context::LocalCatalog;
pub use identity::{get_or_create, IdentityKey, Resolved};
pub use transaction::{in_transaction, TxFuture};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the catalog schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://ranked_music.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "creating catalog pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("catalog database connected");

    Ok(pool)
}
