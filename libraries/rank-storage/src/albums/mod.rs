use crate::identity::{self, IdentityKey, Resolved};
use rank_core::{Album, AlbumId, ArtistId, Result, TrackId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

fn from_row(row: &SqliteRow) -> Album {
    Album {
        id: row.get("id"),
        title: row.get("title"),
        musicbrainz_id: row.get("musicbrainz_id"),
        artist_id: row.get("artist_id"),
        artist_name: row.get("artist_name"),
        created_at: row.get("created_at"),
    }
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Album>> {
    let rows = sqlx::query(
        "SELECT al.id, al.title, al.musicbrainz_id, al.created_at,
                aa.artist_id, ar.name AS artist_name
         FROM albums al
         LEFT JOIN album_artist aa ON aa.album_id = al.id
         LEFT JOIN artists ar ON ar.id = aa.artist_id
         ORDER BY al.title, al.id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query(
        "SELECT al.id, al.title, al.musicbrainz_id, al.created_at,
                aa.artist_id, ar.name AS artist_name
         FROM albums al
         LEFT JOIN album_artist aa ON aa.album_id = al.id
         LEFT JOIN artists ar ON ar.id = aa.artist_id
         WHERE al.id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(from_row))
}

/// Albums owned by an artist
pub async fn get_by_artist(pool: &SqlitePool, artist_id: ArtistId) -> Result<Vec<Album>> {
    let rows = sqlx::query(
        "SELECT al.id, al.title, al.musicbrainz_id, al.created_at,
                aa.artist_id, ar.name AS artist_name
         FROM albums al
         JOIN album_artist aa ON aa.album_id = al.id
         JOIN artists ar ON ar.id = aa.artist_id
         WHERE aa.artist_id = ?
         ORDER BY al.title, al.id",
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect())
}

/// Albums a track appears on, oldest association first
pub async fn get_by_track(pool: &SqlitePool, track_id: TrackId) -> Result<Vec<Album>> {
    let rows = sqlx::query(
        "SELECT al.id, al.title, al.musicbrainz_id, al.created_at,
                aa.artist_id, ar.name AS artist_name
         FROM albums al
         JOIN track_album tal ON tal.album_id = al.id
         LEFT JOIN album_artist aa ON aa.album_id = al.id
         LEFT JOIN artists ar ON ar.id = aa.artist_id
         WHERE tal.track_id = ?
         ORDER BY tal.rowid",
    )
    .bind(track_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect())
}

/// Resolve an album by external id, then by title within `owner`; create it if absent
///
/// A newly created album has no owner yet: the caller records it with
/// [`crate::associations::ensure_album_artist`].
pub async fn get_or_create(
    conn: &mut SqliteConnection,
    title: &str,
    owner: ArtistId,
    musicbrainz_id: Option<&str>,
) -> Result<Resolved> {
    identity::get_or_create(conn, IdentityKey::Album { title, owner }, musicbrainz_id).await
}
