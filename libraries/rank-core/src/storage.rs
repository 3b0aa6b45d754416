//! Storage trait for the catalog

use crate::error::Result;
use crate::ranking::MatchOutcome;
use crate::types::{
    Album, Artist, BatchReport, CatalogCounts, ReconcileOutcome, Track, TrackId, TrackRecord,
};
use async_trait::async_trait;

/// Catalog store providing reconciliation and read access
///
/// This trait abstracts the catalog so batch drivers do not depend on a
/// particular database.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // ========================================================================
    // Reconciliation
    // ========================================================================

    /// Reconcile one record against the catalog
    ///
    /// All writes for the record commit together or not at all.
    async fn reconcile(&self, record: &TrackRecord) -> Result<ReconcileOutcome>;

    /// Reconcile records one after another, in order
    ///
    /// A failed record is reported in the batch and does not stop the rest.
    async fn reconcile_batch(&self, records: &[TrackRecord]) -> BatchReport {
        let mut report = BatchReport::default();
        for record in records {
            report.push(self.reconcile(record).await);
        }
        report
    }

    // ========================================================================
    // Tracks
    // ========================================================================

    /// Get all tracks
    async fn get_all_tracks(&self) -> Result<Vec<Track>>;

    /// Get track by ID
    async fn get_track(&self, id: TrackId) -> Result<Option<Track>>;

    /// Apply an Elo match between two tracks, returning their new rankings
    async fn record_match(
        &self,
        first: TrackId,
        second: TrackId,
        outcome: MatchOutcome,
    ) -> Result<(f64, f64)>;

    // ========================================================================
    // Artists & albums
    // ========================================================================

    /// Get all artists
    async fn get_all_artists(&self) -> Result<Vec<Artist>>;

    /// Find artist by exact name
    async fn find_artist_by_name(&self, name: &str) -> Result<Option<Artist>>;

    /// Get all albums
    async fn get_all_albums(&self) -> Result<Vec<Album>>;

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Row counts per relation
    async fn counts(&self) -> Result<CatalogCounts>;
}
