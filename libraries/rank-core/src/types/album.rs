//! Album types

use super::ArtistId;
use serde::{Deserialize, Serialize};

pub type AlbumId = i64;

/// An album stored in the catalog
///
/// The owning artist comes from `album_artist` and is fixed when the album is
/// first created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub musicbrainz_id: Option<String>,
    pub artist_id: Option<ArtistId>,
    pub artist_name: Option<String>, // Denormalized
    pub created_at: String,
}
