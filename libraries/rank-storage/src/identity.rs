//! Get-or-create by identity key
//!
//! Artists and albums share one resolution routine:
//!
//! 1. if an external (MusicBrainz) identifier is supplied, look it up
//! 2. otherwise, or when nothing carries that identifier, look up the natural
//!    key (artist name, or album title + owning artist)
//! 3. insert a new row when both lookups miss
//!
//! The natural-key lookup considers every row, whatever external identifier it
//! carries, so one name (or one title under one owner) stays one row.
//!
//! Existing rows are never updated, including their external identifier.

use rank_core::{AlbumId, ArtistId, Result};
use sqlx::SqliteConnection;

/// Natural identity of an artist or album row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityKey<'a> {
    /// Artists are identified by exact name
    Artist { name: &'a str },

    /// Albums are identified by title within the owning (primary) artist
    Album { title: &'a str, owner: ArtistId },
}

impl IdentityKey<'_> {
    fn entity(&self) -> &'static str {
        match self {
            Self::Artist { .. } => "artist",
            Self::Album { .. } => "album",
        }
    }
}

/// Row resolved by [`get_or_create`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub id: i64,
    pub created: bool,
}

/// Find the row for `key`, creating it if absent
pub async fn get_or_create(
    conn: &mut SqliteConnection,
    key: IdentityKey<'_>,
    musicbrainz_id: Option<&str>,
) -> Result<Resolved> {
    if let Some(mbid) = musicbrainz_id {
        if let Some(id) = find_by_external_id(conn, key, mbid).await? {
            tracing::debug!(entity = key.entity(), id, mbid, "matched by external id");
            return Ok(Resolved { id, created: false });
        }
    }

    if let Some(id) = find_by_natural_key(conn, key).await? {
        tracing::debug!(entity = key.entity(), id, ?key, "matched by natural key");
        return Ok(Resolved { id, created: false });
    }

    let id = insert(conn, key, musicbrainz_id).await?;
    tracing::debug!(entity = key.entity(), id, ?key, "created");

    Ok(Resolved { id, created: true })
}

async fn find_by_external_id(
    conn: &mut SqliteConnection,
    key: IdentityKey<'_>,
    mbid: &str,
) -> Result<Option<i64>> {
    let sql = match key {
        IdentityKey::Artist { .. } => {
            "SELECT id FROM artists WHERE musicbrainz_id = ? ORDER BY id LIMIT 1"
        }
        IdentityKey::Album { .. } => {
            "SELECT id FROM albums WHERE musicbrainz_id = ? ORDER BY id LIMIT 1"
        }
    };

    let id = sqlx::query_scalar::<_, i64>(sql)
        .bind(mbid)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(id)
}

async fn find_by_natural_key(
    conn: &mut SqliteConnection,
    key: IdentityKey<'_>,
) -> Result<Option<i64>> {
    let id = match key {
        IdentityKey::Artist { name } => {
            sqlx::query_scalar::<_, i64>(
                "SELECT id FROM artists WHERE name = ? ORDER BY id LIMIT 1",
            )
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?
        }
        IdentityKey::Album { title, owner } => {
            sqlx::query_scalar::<_, AlbumId>(
                "SELECT al.id FROM albums al
                 JOIN album_artist aa ON aa.album_id = al.id
                 WHERE al.title = ? AND aa.artist_id = ?
                 ORDER BY al.id LIMIT 1",
            )
            .bind(title)
            .bind(owner)
            .fetch_optional(&mut *conn)
            .await?
        }
    };

    Ok(id)
}

async fn insert(
    conn: &mut SqliteConnection,
    key: IdentityKey<'_>,
    musicbrainz_id: Option<&str>,
) -> Result<i64> {
    let result = match key {
        IdentityKey::Artist { name } => {
            sqlx::query("INSERT INTO artists (name, musicbrainz_id) VALUES (?, ?)")
                .bind(name)
                .bind(musicbrainz_id)
                .execute(&mut *conn)
                .await?
        }
        // Ownership (album_artist) is recorded by the caller once the album exists
        IdentityKey::Album { title, .. } => {
            sqlx::query("INSERT INTO albums (title, musicbrainz_id) VALUES (?, ?)")
                .bind(title)
                .bind(musicbrainz_id)
                .execute(&mut *conn)
                .await?
        }
    };

    Ok(result.last_insert_rowid())
}
