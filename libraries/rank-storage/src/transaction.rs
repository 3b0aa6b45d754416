//! Transaction coordination
//!
//! Every unit of catalog work runs inside exactly one transaction: begun
//! before the first lookup, committed after the last write, rolled back on
//! any error. A panic inside the unit drops the transaction, which `sqlx`
//! rolls back as well.

use rank_core::Result;
use sqlx::{SqliteConnection, SqlitePool};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by a unit of transactional work
pub type TxFuture<'c, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'c>>;

/// Run `work` inside a fresh transaction on `pool`
///
/// `label` only appears in logs.
pub async fn in_transaction<T, F>(pool: &SqlitePool, label: &str, work: F) -> Result<T>
where
    T: Send,
    F: for<'c> FnOnce(&'c mut SqliteConnection) -> TxFuture<'c, T>,
{
    let mut tx = pool.begin().await?;

    match work(&mut *tx).await {
        Ok(value) => {
            tx.commit().await?;
            tracing::trace!(label, "transaction committed");
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(label, error = %rollback_err, "rollback failed");
            } else {
                tracing::debug!(label, error = %err, "transaction rolled back");
            }
            Err(err)
        }
    }
}
