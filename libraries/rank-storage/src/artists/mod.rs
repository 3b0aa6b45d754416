use crate::identity::{self, IdentityKey, Resolved};
use rank_core::{Artist, ArtistId, Result, TrackId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

fn from_row(row: &SqliteRow) -> Artist {
    Artist {
        id: row.get("id"),
        name: row.get("name"),
        musicbrainz_id: row.get("musicbrainz_id"),
        created_at: row.get("created_at"),
    }
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Artist>> {
    let rows = sqlx::query(
        "SELECT id, name, musicbrainz_id, created_at
         FROM artists
         ORDER BY name, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: ArtistId) -> Result<Option<Artist>> {
    let row = sqlx::query(
        "SELECT id, name, musicbrainz_id, created_at
         FROM artists
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(from_row))
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Artist>> {
    let row = sqlx::query(
        "SELECT id, name, musicbrainz_id, created_at
         FROM artists
         WHERE name = ?
         ORDER BY id
         LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(from_row))
}

pub async fn find_by_musicbrainz_id(pool: &SqlitePool, mbid: &str) -> Result<Option<Artist>> {
    let row = sqlx::query(
        "SELECT id, name, musicbrainz_id, created_at
         FROM artists
         WHERE musicbrainz_id = ?",
    )
    .bind(mbid)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(from_row))
}

/// Primary artist of a track, if it has one
pub async fn get_primary_for_track(pool: &SqlitePool, track_id: TrackId) -> Result<Option<Artist>> {
    let row = sqlx::query(
        "SELECT a.id, a.name, a.musicbrainz_id, a.created_at
         FROM artists a
         JOIN track_artist ta ON ta.artist_id = a.id
         WHERE ta.track_id = ? AND ta.is_primary_artist = 1",
    )
    .bind(track_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(from_row))
}

/// Secondary artists of a track, in the order they were credited
pub async fn get_others_for_track(pool: &SqlitePool, track_id: TrackId) -> Result<Vec<Artist>> {
    let rows = sqlx::query(
        "SELECT a.id, a.name, a.musicbrainz_id, a.created_at
         FROM artists a
         JOIN track_artist ta ON ta.artist_id = a.id
         WHERE ta.track_id = ? AND ta.is_primary_artist = 0
         ORDER BY ta.rowid",
    )
    .bind(track_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect())
}

/// Resolve an artist by external id, then by exact name; create it if absent
pub async fn get_or_create(
    conn: &mut SqliteConnection,
    name: &str,
    musicbrainz_id: Option<&str>,
) -> Result<Resolved> {
    identity::get_or_create(conn, IdentityKey::Artist { name }, musicbrainz_id).await
}
