use crate::{albums, artists, reconcile, stats, tracks};
use async_trait::async_trait;
use rank_core::ranking::MatchOutcome;
use rank_core::{
    Album, Artist, BatchReport, CatalogCounts, CatalogStore, ReconcileOutcome, Result, Track,
    TrackId, TrackRecord,
};
use sqlx::SqlitePool;

/// Local catalog using `SQLite`
#[derive(Debug, Clone)]
pub struct LocalCatalog {
    pool: SqlitePool,
}

impl LocalCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for LocalCatalog {
    // Reconciliation
    async fn reconcile(&self, record: &TrackRecord) -> Result<ReconcileOutcome> {
        reconcile::reconcile(&self.pool, record).await
    }

    async fn reconcile_batch(&self, records: &[TrackRecord]) -> BatchReport {
        reconcile::reconcile_batch(&self.pool, records).await
    }

    // Tracks
    async fn get_all_tracks(&self) -> Result<Vec<Track>> {
        tracks::get_all(&self.pool).await
    }

    async fn get_track(&self, id: TrackId) -> Result<Option<Track>> {
        tracks::get_by_id(&self.pool, id).await
    }

    async fn record_match(
        &self,
        first: TrackId,
        second: TrackId,
        outcome: MatchOutcome,
    ) -> Result<(f64, f64)> {
        tracks::record_match(&self.pool, first, second, outcome).await
    }

    // Artists & albums
    async fn get_all_artists(&self) -> Result<Vec<Artist>> {
        artists::get_all(&self.pool).await
    }

    async fn find_artist_by_name(&self, name: &str) -> Result<Option<Artist>> {
        artists::find_by_name(&self.pool, name).await
    }

    async fn get_all_albums(&self) -> Result<Vec<Album>> {
        albums::get_all(&self.pool).await
    }

    // Statistics
    async fn counts(&self) -> Result<CatalogCounts> {
        stats::counts(&self.pool).await
    }
}
