use rank_core::{CatalogCounts, Result};
use sqlx::SqlitePool;

/// Count rows in every catalog relation
pub async fn counts(pool: &SqlitePool) -> Result<CatalogCounts> {
    Ok(CatalogCounts {
        tracks: count(pool, "tracks").await?,
        artists: count(pool, "artists").await?,
        albums: count(pool, "albums").await?,
        track_artists: count(pool, "track_artist").await?,
        track_albums: count(pool, "track_album").await?,
        album_artists: count(pool, "album_artist").await?,
    })
}

// `table` is always one of the fixed names above
async fn count(pool: &SqlitePool, table: &'static str) -> Result<i64> {
    let n = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await?;

    Ok(n)
}
