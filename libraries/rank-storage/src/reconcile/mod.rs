//! Catalog reconciler
//!
//! Matches one input record against the catalog and brings the catalog up to
//! date with it: an unknown track is created together with whatever artists
//! and album it needs, a known track only gains the associations it lacks.
//! Stored titles and primary artists are never rewritten.

use crate::associations::{ensure_album_artist, ensure_track_album, ensure_track_artist};
use crate::identity::Resolved;
use crate::transaction::in_transaction;
use crate::tracks::{self, ExistingTrack};
use crate::{albums, artists};
use rank_core::ranking::STARTING_RANKING;
use rank_core::{
    ArtistId, BatchReport, Conflict, NormalizedRecord, ReconcileOutcome, ReconcileStatus, Result,
    TrackId, TrackMatch, TrackRecord,
};
use sqlx::{SqliteConnection, SqlitePool};

/// Reconcile one record in its own transaction
///
/// Invalid records are rejected before the transaction starts. On any
/// storage failure nothing written for this record survives.
pub async fn reconcile(pool: &SqlitePool, record: &TrackRecord) -> Result<ReconcileOutcome> {
    let record = record.normalize()?;
    let title = record.title.clone();

    let result = in_transaction(pool, "reconcile", move |conn| {
        Box::pin(async move { apply(conn, &record).await })
    })
    .await;

    match &result {
        Ok(outcome) => {
            match outcome.status {
                ReconcileStatus::Created => {
                    tracing::info!(track_id = outcome.track_id, %title, "track created");
                }
                ReconcileStatus::Merged => {
                    tracing::debug!(
                        track_id = outcome.track_id,
                        album_linked = outcome.album_linked,
                        other_artists_linked = outcome.other_artists_linked,
                        "track merged"
                    );
                }
                ReconcileStatus::Unchanged => {
                    tracing::debug!(track_id = outcome.track_id, "track unchanged");
                }
            }
            for conflict in &outcome.conflicts {
                tracing::warn!(track_id = outcome.track_id, ?conflict, "input not applied");
            }
        }
        Err(e) => {
            tracing::error!(%title, error = %e, "reconciliation failed");
        }
    }

    result
}

/// Reconcile records one after another
///
/// Each record gets its own transaction; a failure is recorded and the next
/// record is processed.
pub async fn reconcile_batch(pool: &SqlitePool, records: &[TrackRecord]) -> BatchReport {
    let mut report = BatchReport::default();

    for record in records {
        report.push(reconcile(pool, record).await);
    }

    tracing::info!("{}", report.summary_text());
    report
}

async fn apply(conn: &mut SqliteConnection, record: &NormalizedRecord) -> Result<ReconcileOutcome> {
    match find_existing(conn, record).await? {
        Some((id, matched_by)) => {
            let existing = tracks::load_existing(conn, id).await?;
            merge_into(conn, existing, matched_by, record).await
        }
        None => create(conn, record).await,
    }
}

/// Locate the stored track this record describes
///
/// A record carrying an external identifier is matched by that identifier
/// alone; an unknown identifier is a new track. Records without one are
/// matched by title and primary artist name.
async fn find_existing(
    conn: &mut SqliteConnection,
    record: &NormalizedRecord,
) -> Result<Option<(TrackId, TrackMatch)>> {
    if let Some(mbid) = record.musicbrainz_id.as_deref() {
        let found = tracks::find_by_musicbrainz_id(conn, mbid).await?;
        return Ok(found.map(|id| (id, TrackMatch::ExternalId)));
    }

    let found =
        tracks::find_by_title_and_artist(conn, &record.title, &record.primary_artist.name).await?;

    Ok(found.map(|id| (id, TrackMatch::TitleAndArtist)))
}

async fn merge_into(
    conn: &mut SqliteConnection,
    existing: ExistingTrack,
    matched_by: TrackMatch,
    record: &NormalizedRecord,
) -> Result<ReconcileOutcome> {
    let mut outcome = ReconcileOutcome {
        track_id: existing.id,
        status: ReconcileStatus::Unchanged,
        matched_by: Some(matched_by),
        artists_created: Vec::new(),
        album_created: None,
        album_linked: false,
        other_artists_linked: 0,
        conflicts: Vec::new(),
    };

    if existing.title != record.title {
        outcome.conflicts.push(Conflict::Title {
            stored: existing.title.clone(),
            incoming: record.title.clone(),
        });
    }
    if existing.primary_artist_name != record.primary_artist.name {
        outcome.conflicts.push(Conflict::PrimaryArtist {
            stored: existing.primary_artist_name.clone(),
            incoming: record.primary_artist.name.clone(),
        });
    }

    // New albums belong to the stored primary artist, whatever the input says
    if let Some(album) = &record.album {
        if !existing.album_titles.contains(&album.title) {
            let resolved = albums::get_or_create(
                conn,
                &album.title,
                existing.primary_artist_id,
                album.musicbrainz_id.as_deref(),
            )
            .await?;

            if resolved.created {
                ensure_album_artist(conn, resolved.id, existing.primary_artist_id).await?;
                outcome.album_created = Some(resolved.id);
            }
            outcome.album_linked = ensure_track_album(conn, existing.id, resolved.id).await?;
        }
    }

    for credit in &record.other_artists {
        if credit.name == existing.primary_artist_name
            || existing.other_artist_names.contains(&credit.name)
        {
            continue;
        }

        let resolved =
            artists::get_or_create(conn, &credit.name, credit.musicbrainz_id.as_deref()).await?;
        if resolved.created {
            outcome.artists_created.push(resolved.id);
        }
        if resolved.id == existing.primary_artist_id {
            continue;
        }

        if ensure_track_artist(conn, existing.id, resolved.id, false).await? {
            outcome.other_artists_linked += 1;
        }
    }

    if outcome.album_linked || outcome.other_artists_linked > 0 {
        outcome.status = ReconcileStatus::Merged;
    }

    Ok(outcome)
}

async fn create(conn: &mut SqliteConnection, record: &NormalizedRecord) -> Result<ReconcileOutcome> {
    let mut artists_created = Vec::new();

    let primary = artists::get_or_create(
        conn,
        &record.primary_artist.name,
        record.primary_artist.musicbrainz_id.as_deref(),
    )
    .await?;
    note_created(&mut artists_created, primary);

    let mut others: Vec<ArtistId> = Vec::with_capacity(record.other_artists.len());
    for credit in &record.other_artists {
        let resolved =
            artists::get_or_create(conn, &credit.name, credit.musicbrainz_id.as_deref()).await?;
        note_created(&mut artists_created, resolved);

        // Two credits can resolve to one row through a shared external id
        if resolved.id != primary.id && !others.contains(&resolved.id) {
            others.push(resolved.id);
        }
    }

    let track_id = tracks::insert(
        conn,
        &record.title,
        record.musicbrainz_id.as_deref(),
        STARTING_RANKING,
    )
    .await?;

    ensure_track_artist(conn, track_id, primary.id, true).await?;
    let mut other_artists_linked = 0;
    for artist_id in others {
        if ensure_track_artist(conn, track_id, artist_id, false).await? {
            other_artists_linked += 1;
        }
    }

    let mut album_created = None;
    let mut album_linked = false;
    if let Some(album) = &record.album {
        let resolved = albums::get_or_create(
            conn,
            &album.title,
            primary.id,
            album.musicbrainz_id.as_deref(),
        )
        .await?;

        if resolved.created {
            ensure_album_artist(conn, resolved.id, primary.id).await?;
            album_created = Some(resolved.id);
        }
        album_linked = ensure_track_album(conn, track_id, resolved.id).await?;
    }

    Ok(ReconcileOutcome {
        track_id,
        status: ReconcileStatus::Created,
        matched_by: None,
        artists_created,
        album_created,
        album_linked,
        other_artists_linked,
        conflicts: Vec::new(),
    })
}

fn note_created(created: &mut Vec<ArtistId>, resolved: Resolved) {
    if resolved.created {
        created.push(resolved.id);
    }
}
