//! Artist types

use serde::{Deserialize, Serialize};

pub type ArtistId = i64;

/// An artist stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub musicbrainz_id: Option<String>,
    pub created_at: String,
}
