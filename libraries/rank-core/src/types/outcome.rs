//! Reconciliation results

use super::{AlbumId, ArtistId, TrackId};
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// How an existing track was recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackMatch {
    /// Same external (MusicBrainz) identifier
    ExternalId,

    /// Same title and same primary artist name
    TitleAndArtist,
}

/// What reconciliation did to the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileStatus {
    /// A new track row was inserted
    Created,

    /// An existing track gained at least one association
    Merged,

    /// An existing track already had everything the record describes
    Unchanged,
}

/// A field of the input that disagreed with the stored track and was ignored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum Conflict {
    Title { stored: String, incoming: String },
    PrimaryArtist { stored: String, incoming: String },
}

/// Structured result of reconciling one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    pub track_id: TrackId,
    pub status: ReconcileStatus,

    /// `None` when the track was created
    pub matched_by: Option<TrackMatch>,

    /// Artist rows inserted while reconciling this record
    pub artists_created: Vec<ArtistId>,

    /// Album row inserted while reconciling this record
    pub album_created: Option<AlbumId>,

    /// Whether a new track–album association was recorded
    pub album_linked: bool,

    /// Number of new secondary-artist associations
    pub other_artists_linked: usize,

    /// Input values that were not applied because the stored ones win
    pub conflicts: Vec<Conflict>,
}

impl ReconcileOutcome {
    pub fn was_created(&self) -> bool {
        self.status == ReconcileStatus::Created
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Row counts per catalog relation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCounts {
    pub tracks: i64,
    pub artists: i64,
    pub albums: i64,
    pub track_artists: i64,
    pub track_albums: i64,
    pub album_artists: i64,
}

/// Per-record results of reconciling a batch, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<std::result::Result<ReconcileOutcome, CatalogError>>,
}

impl BatchReport {
    pub fn push(&mut self, result: std::result::Result<ReconcileOutcome, CatalogError>) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn created(&self) -> usize {
        self.count_status(ReconcileStatus::Created)
    }

    pub fn merged(&self) -> usize {
        self.count_status(ReconcileStatus::Merged)
    }

    pub fn unchanged(&self) -> usize {
        self.count_status(ReconcileStatus::Unchanged)
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.is_err()).count()
    }

    pub fn conflicts(&self) -> usize {
        self.results
            .iter()
            .filter_map(|r| r.as_ref().ok())
            .map(|o| o.conflicts.len())
            .sum()
    }

    fn count_status(&self, status: ReconcileStatus) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, Ok(o) if o.status == status))
            .count()
    }

    pub fn summary_text(&self) -> String {
        format!(
            "Reconciled {} records: {} created, {} merged, {} unchanged, {} failed, {} conflicts",
            self.len(),
            self.created(),
            self.merged(),
            self.unchanged(),
            self.failed(),
            self.conflicts()
        )
    }
}
