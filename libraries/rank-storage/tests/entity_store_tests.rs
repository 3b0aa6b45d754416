//! Integration tests for the entity store and association manager
//!
//! Tests the building blocks the reconciler is made of:
//! - Get-or-create for artists and albums, external id first
//! - Natural-key fallback when an external id matches nothing
//! - Idempotent association writes
//! - Refusal of a second primary artist

mod test_helpers;

use rank_core::CatalogError;
use rank_storage::{albums, artists, associations, tracks};
use test_helpers::*;

// ============================================================================
// Artists
// ============================================================================

#[tokio::test]
async fn test_artist_get_or_create_by_name() {
    let test_db = TestDb::new().await;
    let mut conn = test_db.pool().acquire().await.expect("Failed to acquire");

    let first = artists::get_or_create(&mut conn, "Kate Bush", None)
        .await
        .expect("Failed to create artist");
    let second = artists::get_or_create(&mut conn, "Kate Bush", None)
        .await
        .expect("Failed to resolve artist");

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.id, second.id);

    // Names are matched exactly
    let other = artists::get_or_create(&mut conn, "kate bush", None)
        .await
        .expect("Failed to create artist");
    assert!(other.created);
    assert_ne!(other.id, first.id);
}

#[tokio::test]
async fn test_artist_external_id_takes_precedence() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let mut conn = pool.acquire().await.expect("Failed to acquire");

    let stored = artists::get_or_create(&mut conn, "Prince", Some("mb-prince"))
        .await
        .expect("Failed to create artist");
    let renamed = artists::get_or_create(&mut conn, "The Artist", Some("mb-prince"))
        .await
        .expect("Failed to resolve artist");

    assert_eq!(stored.id, renamed.id);
    assert!(!renamed.created);

    // The stored row keeps its original name
    let artist = artists::get_by_id(pool, stored.id)
        .await
        .expect("Failed to get artist")
        .expect("Artist not found");
    assert_eq!(artist.name, "Prince");

    let by_mbid = artists::find_by_musicbrainz_id(pool, "mb-prince")
        .await
        .expect("Failed to find artist")
        .expect("Artist not found");
    assert_eq!(by_mbid.id, stored.id);
}

#[tokio::test]
async fn test_artist_unknown_external_id_falls_back_to_name() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let mut conn = pool.acquire().await.expect("Failed to acquire");

    let plain = artists::get_or_create(&mut conn, "Nirvana", None)
        .await
        .expect("Failed to create artist");
    let identified = artists::get_or_create(&mut conn, "Nirvana", Some("mb-nirvana-us"))
        .await
        .expect("Failed to resolve artist");

    assert_eq!(plain.id, identified.id);

    // Not back-filled
    let artist = artists::get_by_id(pool, plain.id)
        .await
        .expect("Failed to get artist")
        .expect("Artist not found");
    assert!(artist.musicbrainz_id.is_none());
}

#[tokio::test]
async fn test_artist_name_matches_row_with_other_external_id() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let mut conn = pool.acquire().await.expect("Failed to acquire");

    let first = artists::get_or_create(&mut conn, "Nirvana", Some("mb-nirvana-us"))
        .await
        .expect("Failed to create artist");
    let second = artists::get_or_create(&mut conn, "Nirvana", Some("mb-nirvana-uk"))
        .await
        .expect("Failed to resolve artist");

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.id, second.id);

    // The stored id is kept
    let artist = artists::get_by_id(pool, first.id)
        .await
        .expect("Failed to get artist")
        .expect("Artist not found");
    assert_eq!(artist.musicbrainz_id.as_deref(), Some("mb-nirvana-us"));
    assert!(artists::find_by_musicbrainz_id(pool, "mb-nirvana-uk")
        .await
        .expect("Failed to find artist")
        .is_none());

    let plain = artists::get_or_create(&mut conn, "Nirvana", None)
        .await
        .expect("Failed to resolve artist");
    assert_eq!(plain.id, first.id);
}

// ============================================================================
// Albums
// ============================================================================

#[tokio::test]
async fn test_album_identity_is_title_within_owner() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let mut conn = pool.acquire().await.expect("Failed to acquire");

    let owner_a = artists::get_or_create(&mut conn, "Artist A", None)
        .await
        .expect("Failed to create artist");
    let owner_b = artists::get_or_create(&mut conn, "Artist B", None)
        .await
        .expect("Failed to create artist");

    let album_a = albums::get_or_create(&mut conn, "Greatest Hits", owner_a.id, None)
        .await
        .expect("Failed to create album");
    assert!(album_a.created);
    associations::ensure_album_artist(&mut conn, album_a.id, owner_a.id)
        .await
        .expect("Failed to set owner");

    let again = albums::get_or_create(&mut conn, "Greatest Hits", owner_a.id, None)
        .await
        .expect("Failed to resolve album");
    assert_eq!(again.id, album_a.id);
    assert!(!again.created);

    let album_b = albums::get_or_create(&mut conn, "Greatest Hits", owner_b.id, None)
        .await
        .expect("Failed to create album");
    assert!(album_b.created);
    assert_ne!(album_b.id, album_a.id);
}

#[tokio::test]
async fn test_album_external_id_ignores_owner() {
    let test_db = TestDb::new().await;
    let mut conn = test_db.pool().acquire().await.expect("Failed to acquire");

    let owner_a = artists::get_or_create(&mut conn, "Artist A", None)
        .await
        .expect("Failed to create artist");
    let owner_b = artists::get_or_create(&mut conn, "Artist B", None)
        .await
        .expect("Failed to create artist");

    let first = albums::get_or_create(&mut conn, "Split EP", owner_a.id, Some("mb-split"))
        .await
        .expect("Failed to create album");
    let second = albums::get_or_create(&mut conn, "Split EP", owner_b.id, Some("mb-split"))
        .await
        .expect("Failed to resolve album");

    assert_eq!(first.id, second.id);
    assert!(!second.created);
}

#[tokio::test]
async fn test_album_title_within_owner_matches_other_release_id() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let mut conn = pool.acquire().await.expect("Failed to acquire");

    let owner = artists::get_or_create(&mut conn, "Artist 1", None)
        .await
        .expect("Failed to create artist");

    let first = albums::get_or_create(&mut conn, "Album 1", owner.id, Some("mb-release-1"))
        .await
        .expect("Failed to create album");
    associations::ensure_album_artist(&mut conn, first.id, owner.id)
        .await
        .expect("Failed to set owner");

    let second = albums::get_or_create(&mut conn, "Album 1", owner.id, Some("mb-release-2"))
        .await
        .expect("Failed to resolve album");

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.id, second.id);

    let owned = albums::get_by_artist(pool, owner.id)
        .await
        .expect("Failed to get albums");
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].musicbrainz_id.as_deref(), Some("mb-release-1"));
}

// ============================================================================
// Associations
// ============================================================================

#[tokio::test]
async fn test_associations_are_idempotent() {
    let test_db = TestDb::new().await;
    let mut conn = test_db.pool().acquire().await.expect("Failed to acquire");

    let artist = artists::get_or_create(&mut conn, "Artist 1", None)
        .await
        .expect("Failed to create artist");
    let album = albums::get_or_create(&mut conn, "Album 1", artist.id, None)
        .await
        .expect("Failed to create album");
    let track_id = tracks::insert(&mut conn, "Title 1", None, 1000.0)
        .await
        .expect("Failed to insert track");

    assert!(associations::ensure_track_artist(&mut conn, track_id, artist.id, true)
        .await
        .expect("Failed to link artist"));
    assert!(!associations::ensure_track_artist(&mut conn, track_id, artist.id, true)
        .await
        .expect("Failed to link artist"));

    assert!(associations::ensure_track_album(&mut conn, track_id, album.id)
        .await
        .expect("Failed to link album"));
    assert!(!associations::ensure_track_album(&mut conn, track_id, album.id)
        .await
        .expect("Failed to link album"));

    assert!(associations::ensure_album_artist(&mut conn, album.id, artist.id)
        .await
        .expect("Failed to set owner"));
    assert!(!associations::ensure_album_artist(&mut conn, album.id, artist.id)
        .await
        .expect("Failed to set owner"));

    let existing = tracks::load_existing(&mut conn, track_id)
        .await
        .expect("Failed to load track");
    assert_eq!(existing.primary_artist_id, artist.id);
    assert!(existing.album_titles.contains("Album 1"));
    assert!(existing.other_artist_names.is_empty());
}

#[tokio::test]
async fn test_second_primary_artist_is_refused() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let mut conn = pool.acquire().await.expect("Failed to acquire");

    let first = artists::get_or_create(&mut conn, "Artist 1", None)
        .await
        .expect("Failed to create artist");
    let second = artists::get_or_create(&mut conn, "Artist 2", None)
        .await
        .expect("Failed to create artist");
    let track_id = tracks::insert(&mut conn, "Title 1", None, 1000.0)
        .await
        .expect("Failed to insert track");

    associations::ensure_track_artist(&mut conn, track_id, first.id, true)
        .await
        .expect("Failed to link primary");

    let result = associations::ensure_track_artist(&mut conn, track_id, second.id, true).await;
    assert!(matches!(result, Err(CatalogError::Invariant(_))));

    // A secondary credit is still allowed
    assert!(associations::ensure_track_artist(&mut conn, track_id, second.id, false)
        .await
        .expect("Failed to link secondary"));

    // An existing credit keeps its flag
    assert!(!associations::ensure_track_artist(&mut conn, track_id, first.id, false)
        .await
        .expect("Failed to relink primary"));
    drop(conn);

    let primary = artists::get_primary_for_track(pool, track_id)
        .await
        .expect("Failed to get primary")
        .expect("Primary not found");
    assert_eq!(primary.id, first.id);

    assert_eq!(count_rows(pool, "track_artist").await, 2);
}
