//! Input records
//!
//! A `TrackRecord` is what a metadata extractor produces for one media file.
//! Nothing in it has been matched against the catalog yet.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};

/// An artist as credited on an input record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArtistCredit {
    pub name: String,
    pub musicbrainz_id: Option<String>,
}

impl ArtistCredit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            musicbrainz_id: None,
        }
    }

    pub fn with_musicbrainz_id(mut self, id: impl Into<String>) -> Self {
        self.musicbrainz_id = Some(id.into());
        self
    }
}

/// An album as credited on an input record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlbumCredit {
    pub title: String,
    pub musicbrainz_id: Option<String>,
}

impl AlbumCredit {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            musicbrainz_id: None,
        }
    }

    pub fn with_musicbrainz_id(mut self, id: impl Into<String>) -> Self {
        self.musicbrainz_id = Some(id.into());
        self
    }
}

/// Descriptive record for one track, as read from a media file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackRecord {
    pub title: String,
    pub musicbrainz_id: Option<String>,
    pub album: AlbumCredit,
    pub primary_artist: ArtistCredit,
    #[serde(default)]
    pub other_artists: Vec<ArtistCredit>,
}

impl TrackRecord {
    /// Create a record with no secondary artists and no external identifiers
    pub fn new(
        title: impl Into<String>,
        album: impl Into<String>,
        primary_artist: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            musicbrainz_id: None,
            album: AlbumCredit::new(album),
            primary_artist: ArtistCredit::new(primary_artist),
            other_artists: Vec::new(),
        }
    }

    pub fn with_musicbrainz_id(mut self, id: impl Into<String>) -> Self {
        self.musicbrainz_id = Some(id.into());
        self
    }

    pub fn with_other_artist(mut self, name: impl Into<String>) -> Self {
        self.other_artists.push(ArtistCredit::new(name));
        self
    }

    pub fn with_other_artist_credit(mut self, credit: ArtistCredit) -> Self {
        self.other_artists.push(credit);
        self
    }

    /// Validate the record and clean it up for reconciliation
    ///
    /// - blank external identifiers become `None`
    /// - a blank album title means the track has no album
    /// - secondary artists are de-duplicated by name and external identifier;
    ///   blank names and the primary artist are dropped
    ///
    /// Names and titles are otherwise kept byte-for-byte: identity matching
    /// is exact.
    pub fn normalize(&self) -> Result<NormalizedRecord> {
        if is_blank(&self.title) {
            return Err(CatalogError::invalid_input("track title is empty"));
        }
        if is_blank(&self.primary_artist.name) {
            return Err(CatalogError::invalid_input(format!(
                "track '{}' has no primary artist",
                self.title
            )));
        }

        let album = if is_blank(&self.album.title) {
            None
        } else {
            Some(AlbumCredit {
                title: self.album.title.clone(),
                musicbrainz_id: external_id(self.album.musicbrainz_id.as_deref()),
            })
        };

        let primary_artist = ArtistCredit {
            name: self.primary_artist.name.clone(),
            musicbrainz_id: external_id(self.primary_artist.musicbrainz_id.as_deref()),
        };

        let mut other_artists: Vec<ArtistCredit> = Vec::with_capacity(self.other_artists.len());
        for credit in &self.other_artists {
            if is_blank(&credit.name) || credit.name == primary_artist.name {
                continue;
            }
            let credit = ArtistCredit {
                name: credit.name.clone(),
                musicbrainz_id: external_id(credit.musicbrainz_id.as_deref()),
            };
            if !other_artists.contains(&credit) {
                other_artists.push(credit);
            }
        }

        Ok(NormalizedRecord {
            title: self.title.clone(),
            musicbrainz_id: external_id(self.musicbrainz_id.as_deref()),
            album,
            primary_artist,
            other_artists,
        })
    }
}

/// A validated `TrackRecord`, ready to be reconciled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub title: String,
    pub musicbrainz_id: Option<String>,
    pub album: Option<AlbumCredit>,
    pub primary_artist: ArtistCredit,
    pub other_artists: Vec<ArtistCredit>,
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn external_id(id: Option<&str>) -> Option<String> {
    id.map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_external_ids_become_none() {
        let record = TrackRecord::new("Title 1", "Album 1", "Artist 1").with_musicbrainz_id("  ");
        let normalized = record.normalize().unwrap();
        assert_eq!(normalized.musicbrainz_id, None);
    }

    #[test]
    fn external_ids_are_trimmed() {
        let record = TrackRecord::new("Title 1", "Album 1", "Artist 1").with_musicbrainz_id(" MB1 ");
        let normalized = record.normalize().unwrap();
        assert_eq!(normalized.musicbrainz_id.as_deref(), Some("MB1"));
    }

    #[test]
    fn empty_title_is_rejected() {
        let record = TrackRecord::new("   ", "Album 1", "Artist 1");
        assert!(matches!(
            record.normalize(),
            Err(CatalogError::InvalidInput(_))
        ));
    }

    #[test]
    fn missing_primary_artist_is_rejected() {
        let record = TrackRecord::new("Title 1", "Album 1", "");
        let err = record.normalize().unwrap_err();
        assert!(err.to_string().contains("no primary artist"));
    }

    #[test]
    fn blank_album_means_no_album() {
        let record = TrackRecord::new("Title 1", "", "Artist 1");
        assert_eq!(record.normalize().unwrap().album, None);
    }

    #[test]
    fn secondary_artists_are_deduplicated() {
        let record = TrackRecord::new("Title 1", "Album 1", "Artist 1")
            .with_other_artist("Artist 2")
            .with_other_artist("Artist 1")
            .with_other_artist("Artist 2")
            .with_other_artist("")
            .with_other_artist("Artist 3");

        let names: Vec<String> = record
            .normalize()
            .unwrap()
            .other_artists
            .into_iter()
            .map(|a| a.name)
            .collect();

        assert_eq!(names, vec!["Artist 2", "Artist 3"]);
    }

    #[test]
    fn same_name_with_different_ids_is_kept() {
        let record = TrackRecord::new("Title 1", "Album 1", "Artist 1")
            .with_other_artist_credit(ArtistCredit::new("Guest").with_musicbrainz_id("G1"))
            .with_other_artist_credit(ArtistCredit::new("Guest").with_musicbrainz_id("G2"))
            .with_other_artist_credit(ArtistCredit::new("Guest").with_musicbrainz_id(" G1 "));

        let ids: Vec<Option<String>> = record
            .normalize()
            .unwrap()
            .other_artists
            .into_iter()
            .map(|a| a.musicbrainz_id)
            .collect();

        assert_eq!(ids, vec![Some("G1".to_string()), Some("G2".to_string())]);
    }

    #[test]
    fn names_are_not_case_folded() {
        let record = TrackRecord::new("Title 1", "Album 1", "Artist 1").with_other_artist("artist 1");
        let normalized = record.normalize().unwrap();
        assert_eq!(normalized.other_artists.len(), 1);
        assert_eq!(normalized.other_artists[0].name, "artist 1");
    }
}
