use crate::transaction::in_transaction;
use crate::{albums, artists};
use rank_core::ranking::{self, MatchOutcome};
use rank_core::{ArtistId, CatalogError, Result, Track, TrackId};
use sqlx::{Row, SqliteConnection, SqlitePool};
use std::collections::HashSet;

/// What the reconciler needs to know about a track already in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingTrack {
    pub id: TrackId,
    pub title: String,
    pub primary_artist_id: ArtistId,
    pub primary_artist_name: String,
    pub album_titles: HashSet<String>,
    pub other_artist_names: HashSet<String>,
}

/// Track carrying the given external identifier
pub async fn find_by_musicbrainz_id(
    conn: &mut SqliteConnection,
    mbid: &str,
) -> Result<Option<TrackId>> {
    let id = sqlx::query_scalar::<_, TrackId>("SELECT id FROM tracks WHERE musicbrainz_id = ?")
        .bind(mbid)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(id)
}

/// Track with this exact title whose primary artist has this exact name
pub async fn find_by_title_and_artist(
    conn: &mut SqliteConnection,
    title: &str,
    artist_name: &str,
) -> Result<Option<TrackId>> {
    let id = sqlx::query_scalar::<_, TrackId>(
        "SELECT t.id FROM tracks t
         JOIN track_artist ta ON ta.track_id = t.id AND ta.is_primary_artist = 1
         JOIN artists a ON a.id = ta.artist_id
         WHERE t.title = ? AND a.name = ?
         ORDER BY t.id LIMIT 1",
    )
    .bind(title)
    .bind(artist_name)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(id)
}

/// Load the stored identity and associations of a track
pub async fn load_existing(conn: &mut SqliteConnection, id: TrackId) -> Result<ExistingTrack> {
    let row = sqlx::query(
        "SELECT t.id, t.title, a.id AS artist_id, a.name AS artist_name
         FROM tracks t
         JOIN track_artist ta ON ta.track_id = t.id AND ta.is_primary_artist = 1
         JOIN artists a ON a.id = ta.artist_id
         WHERE t.id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| CatalogError::not_found("Track with primary artist", id))?;

    let album_titles = sqlx::query_scalar::<_, String>(
        "SELECT al.title FROM albums al
         JOIN track_album tal ON tal.album_id = al.id
         WHERE tal.track_id = ?",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    let other_artist_names = sqlx::query_scalar::<_, String>(
        "SELECT a.name FROM artists a
         JOIN track_artist ta ON ta.artist_id = a.id
         WHERE ta.track_id = ? AND ta.is_primary_artist = 0",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(ExistingTrack {
        id: row.get("id"),
        title: row.get("title"),
        primary_artist_id: row.get("artist_id"),
        primary_artist_name: row.get("artist_name"),
        album_titles: album_titles.into_iter().collect(),
        other_artist_names: other_artist_names.into_iter().collect(),
    })
}

/// Insert a bare track row; associations are added separately
pub async fn insert(
    conn: &mut SqliteConnection,
    title: &str,
    musicbrainz_id: Option<&str>,
    ranking: f64,
) -> Result<TrackId> {
    let result = sqlx::query("INSERT INTO tracks (title, musicbrainz_id, ranking) VALUES (?, ?, ?)")
        .bind(title)
        .bind(musicbrainz_id)
        .bind(ranking)
        .execute(&mut *conn)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn get_by_id(pool: &SqlitePool, id: TrackId) -> Result<Option<Track>> {
    let row = sqlx::query(
        "SELECT id, title, musicbrainz_id, ranking, created_at
         FROM tracks
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let primary_artist = artists::get_primary_for_track(pool, id)
        .await?
        .ok_or_else(|| CatalogError::storage(format!("track {} has no primary artist", id)))?;

    Ok(Some(Track {
        id: row.get("id"),
        title: row.get("title"),
        musicbrainz_id: row.get("musicbrainz_id"),
        ranking: row.get("ranking"),
        albums: albums::get_by_track(pool, id).await?,
        primary_artist,
        other_artists: artists::get_others_for_track(pool, id).await?,
        created_at: row.get("created_at"),
    }))
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Track>> {
    let ids = sqlx::query_scalar::<_, TrackId>("SELECT id FROM tracks ORDER BY id")
        .fetch_all(pool)
        .await?;

    let mut tracks = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(track) = get_by_id(pool, id).await? {
            tracks.push(track);
        }
    }

    Ok(tracks)
}

/// Apply an Elo match between two tracks
///
/// Both rankings are read and written in one transaction. Returns the new
/// rankings of `(first, second)`.
pub async fn record_match(
    pool: &SqlitePool,
    first: TrackId,
    second: TrackId,
    outcome: MatchOutcome,
) -> Result<(f64, f64)> {
    if first == second {
        return Err(CatalogError::invalid_input(format!(
            "track {} cannot be matched against itself",
            first
        )));
    }

    in_transaction(pool, "record_match", move |conn| {
        Box::pin(async move {
            let rank_first = get_ranking(conn, first).await?;
            let rank_second = get_ranking(conn, second).await?;

            let (new_first, new_second) = ranking::new_rankings(rank_first, rank_second, outcome);

            set_ranking(conn, first, new_first).await?;
            set_ranking(conn, second, new_second).await?;

            tracing::debug!(
                first,
                second,
                ?outcome,
                new_first,
                new_second,
                "rankings updated"
            );

            Ok((new_first, new_second))
        })
    })
    .await
}

async fn get_ranking(conn: &mut SqliteConnection, id: TrackId) -> Result<f64> {
    sqlx::query_scalar::<_, f64>("SELECT ranking FROM tracks WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| CatalogError::not_found("Track", id))
}

async fn set_ranking(conn: &mut SqliteConnection, id: TrackId, ranking: f64) -> Result<()> {
    sqlx::query("UPDATE tracks SET ranking = ?, updated_at = datetime('now') WHERE id = ?")
        .bind(ranking)
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}
