//! Rank My Music Core
//!
//! Storage-agnostic domain types, traits, and error handling for the
//! Rank My Music catalog.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Artist`, `Album` as stored in the catalog
//! - **Input Records**: `TrackRecord`, the metadata of one media file before
//!   it has been reconciled against the catalog
//! - **Outcomes**: `ReconcileOutcome` and `BatchReport`, the structured result
//!   of reconciling records
//! - **Core Traits**: `CatalogStore`
//! - **Ranking**: Elo rating math used to order tracks
//! - **Error Handling**: Unified `CatalogError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use rank_core::types::TrackRecord;
//!
//! let record = TrackRecord::new("Winter", "Little Earthquakes", "Tori Amos")
//!     .with_musicbrainz_id("8f5d6a8e-0000-4000-8000-000000000001")
//!     .with_other_artist("Eric Rosse");
//!
//! let normalized = record.normalize().unwrap();
//! assert_eq!(normalized.primary_artist.name, "Tori Amos");
//! assert_eq!(normalized.other_artists.len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod ranking;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{CatalogError, Result};
pub use storage::CatalogStore;

pub use types::{
    Album, AlbumCredit, AlbumId, Artist, ArtistCredit, ArtistId, BatchReport, CatalogCounts,
    Conflict, NormalizedRecord, ReconcileOutcome, ReconcileStatus, Track, TrackId, TrackMatch,
    TrackRecord,
};
