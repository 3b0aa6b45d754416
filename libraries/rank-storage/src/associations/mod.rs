//! Idempotent association writes
//!
//! Each `ensure_*` call inserts its row at most once and reports whether it
//! did. Calling it again for an existing association is a no-op.

use rank_core::{AlbumId, ArtistId, CatalogError, Result, TrackId};
use sqlx::SqliteConnection;

/// Credit `artist_id` on `track_id`
///
/// A track has exactly one primary artist. Asking for a second primary is a
/// caller bug and fails with [`CatalogError::Invariant`] without writing.
/// An artist already credited on the track keeps its existing flag.
pub async fn ensure_track_artist(
    conn: &mut SqliteConnection,
    track_id: TrackId,
    artist_id: ArtistId,
    is_primary: bool,
) -> Result<bool> {
    let existing = sqlx::query_scalar::<_, bool>(
        "SELECT is_primary_artist FROM track_artist WHERE track_id = ? AND artist_id = ?",
    )
    .bind(track_id)
    .bind(artist_id)
    .fetch_optional(&mut *conn)
    .await?;

    if let Some(was_primary) = existing {
        if was_primary != is_primary {
            tracing::debug!(
                track_id,
                artist_id,
                was_primary,
                "artist already credited on track, keeping existing flag"
            );
        }
        return Ok(false);
    }

    if is_primary {
        let current = sqlx::query_scalar::<_, ArtistId>(
            "SELECT artist_id FROM track_artist WHERE track_id = ? AND is_primary_artist = 1",
        )
        .bind(track_id)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(current) = current {
            return Err(CatalogError::invariant(format!(
                "track {} already has primary artist {}, refusing to make {} primary",
                track_id, current, artist_id
            )));
        }
    }

    sqlx::query(
        "INSERT INTO track_artist (track_id, artist_id, is_primary_artist) VALUES (?, ?, ?)",
    )
    .bind(track_id)
    .bind(artist_id)
    .bind(is_primary)
    .execute(&mut *conn)
    .await?;

    Ok(true)
}

/// Record that `track_id` appears on `album_id`
pub async fn ensure_track_album(
    conn: &mut SqliteConnection,
    track_id: TrackId,
    album_id: AlbumId,
) -> Result<bool> {
    let result = sqlx::query(
        "INSERT INTO track_album (track_id, album_id) VALUES (?, ?)
         ON CONFLICT(track_id, album_id) DO NOTHING",
    )
    .bind(track_id)
    .bind(album_id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Record `artist_id` as the owner of `album_id`
pub async fn ensure_album_artist(
    conn: &mut SqliteConnection,
    album_id: AlbumId,
    artist_id: ArtistId,
) -> Result<bool> {
    let result = sqlx::query(
        "INSERT INTO album_artist (album_id, artist_id) VALUES (?, ?)
         ON CONFLICT(album_id, artist_id) DO NOTHING",
    )
    .bind(album_id)
    .bind(artist_id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}
