//! Track types

use super::{Album, Artist};
use serde::{Deserialize, Serialize};

pub type TrackId = i64;

/// A track with its albums and credited artists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub musicbrainz_id: Option<String>,
    pub ranking: f64,
    pub albums: Vec<Album>,
    pub primary_artist: Artist,
    pub other_artists: Vec<Artist>,
    pub created_at: String,
}

impl Track {
    /// Titles of every album the track appears on
    pub fn album_titles(&self) -> Vec<&str> {
        self.albums.iter().map(|a| a.title.as_str()).collect()
    }

    /// Names of the secondary artists
    pub fn other_artist_names(&self) -> Vec<&str> {
        self.other_artists.iter().map(|a| a.name.as_str()).collect()
    }
}
