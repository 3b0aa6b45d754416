//! Metadata extraction from audio files
//!
//! Tags are read into [`RawTags`] first and mapped to a [`TrackRecord`]
//! separately, so the mapping rules do not depend on a real audio file.

use crate::{ImportError, Result};
use lofty::{Accessor, ItemKey, Probe, Tag, TaggedFileExt};
use rank_core::{AlbumCredit, ArtistCredit, TrackRecord};
use std::path::Path;

/// Tag values relevant to the catalog, as found in the file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub album_artist: Option<String>,
    pub composer: Option<String>,

    /// MusicBrainz recording id
    pub recording_id: Option<String>,

    /// MusicBrainz release id
    pub release_id: Option<String>,

    /// MusicBrainz artist id of the track artist
    pub artist_id: Option<String>,

    /// MusicBrainz artist id of the album artist
    pub album_artist_id: Option<String>,
}

impl RawTags {
    /// Read the catalog-relevant fields of a tag
    pub fn from_tag(tag: &Tag) -> Self {
        Self {
            title: tag.title().map(|s| s.to_string()),
            artist: tag.artist().map(|s| s.to_string()),
            album: tag.album().map(|s| s.to_string()),
            album_artist: tag.get_string(&ItemKey::AlbumArtist).map(String::from),
            composer: tag.get_string(&ItemKey::Composer).map(String::from),
            recording_id: tag
                .get_string(&ItemKey::MusicBrainzRecordingId)
                .map(String::from),
            release_id: tag
                .get_string(&ItemKey::MusicBrainzReleaseId)
                .map(String::from),
            artist_id: tag
                .get_string(&ItemKey::MusicBrainzArtistId)
                .and_then(first_id),
            album_artist_id: tag
                .get_string(&ItemKey::MusicBrainzReleaseArtistId)
                .and_then(first_id),
        }
    }

    /// Map tags to a catalog record
    ///
    /// The track artist is the primary artist, falling back to the album
    /// artist. The album artist and the composer are credited as secondary
    /// artists when they differ from the artists already credited. A missing
    /// title falls back to `fallback_title`.
    pub fn into_record(self, fallback_title: Option<&str>) -> Result<TrackRecord> {
        let artist = non_blank(self.artist);
        let album_artist = non_blank(self.album_artist);
        let composer = non_blank(self.composer);

        let (primary, primary_id, album_artist) = match (artist, album_artist) {
            (Some(artist), album_artist) => (artist, self.artist_id, album_artist),
            (None, Some(album_artist)) => (album_artist, self.album_artist_id.clone(), None),
            (None, None) => {
                return Err(ImportError::Metadata(
                    "no artist or album artist tag".to_string(),
                ))
            }
        };

        let title = non_blank(self.title)
            .or_else(|| fallback_title.map(String::from))
            .ok_or_else(|| ImportError::Metadata("no title tag".to_string()))?;

        let mut primary_credit = ArtistCredit::new(primary.clone());
        primary_credit.musicbrainz_id = primary_id;

        let mut album = AlbumCredit::new(self.album.unwrap_or_default());
        album.musicbrainz_id = self.release_id;

        let mut record = TrackRecord {
            title,
            musicbrainz_id: self.recording_id,
            album,
            primary_artist: primary_credit,
            other_artists: Vec::new(),
        };

        if let Some(album_artist) = &album_artist {
            if *album_artist != primary {
                let mut credit = ArtistCredit::new(album_artist.clone());
                credit.musicbrainz_id = self.album_artist_id;
                record.other_artists.push(credit);
            }
        }

        if let Some(composer) = composer {
            if composer != primary && Some(&composer) != album_artist.as_ref() {
                record.other_artists.push(ArtistCredit::new(composer));
            }
        }

        Ok(record)
    }
}

/// Read the tags of an audio file
///
/// Files without any tag yield empty [`RawTags`].
pub fn read_tags(path: &Path) -> Result<RawTags> {
    let tagged_file = Probe::open(path)
        .map_err(|e| ImportError::Metadata(format!("Failed to open file: {}", e)))?
        .read()
        .map_err(|e| ImportError::Metadata(format!("Failed to read file: {}", e)))?;

    // Prefer the format's native tag, fall back to whatever is present
    let tag = tagged_file.primary_tag().or(tagged_file.first_tag());

    Ok(tag.map(RawTags::from_tag).unwrap_or_default())
}

/// Extract a catalog record from an audio file
pub fn extract_record(path: &Path) -> Result<TrackRecord> {
    let tags = read_tags(path)?;
    let stem = path.file_stem().and_then(|s| s.to_str());

    tags.into_record(stem).map_err(|e| match e {
        ImportError::Metadata(msg) => ImportError::Metadata(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// Multi-artist tags carry several ids; the first belongs to the first artist
fn first_id(value: &str) -> Option<String> {
    value
        .split(['/', ';'])
        .map(str::trim)
        .find(|id| !id.is_empty())
        .map(String::from)
}
