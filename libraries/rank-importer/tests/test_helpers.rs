//! Test helpers for importer integration tests
//!
//! Catalogs live in REAL SQLite files; audio fixtures are tiny generated WAV
//! files carrying an ID3v2 tag.

#![allow(dead_code)]

use lofty::{Accessor, ItemKey, Tag, TagExt, TagType};
use rank_storage::LocalCatalog;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = rank_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        rank_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    pub fn catalog(&self) -> LocalCatalog {
        LocalCatalog::new(self.pool.clone())
    }
}

/// Tag values for a fixture file
#[derive(Debug, Clone, Default)]
pub struct FixtureTags<'a> {
    pub title: Option<&'a str>,
    pub artist: Option<&'a str>,
    pub album: Option<&'a str>,
    pub album_artist: Option<&'a str>,
    pub composer: Option<&'a str>,
}

/// Write a short silent mono WAV file
pub fn write_silent_wav(path: &Path) {
    const SAMPLE_RATE: u32 = 8000;
    const DATA_LEN: u32 = 1600;

    let mut bytes = Vec::with_capacity(44 + DATA_LEN as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + DATA_LEN).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    bytes.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&DATA_LEN.to_le_bytes());
    bytes.resize(44 + DATA_LEN as usize, 0);

    std::fs::write(path, bytes).expect("Failed to write wav");
}

/// Write a tagged WAV fixture named `file_name` into `dir`
pub fn write_tagged_wav(dir: &Path, file_name: &str, tags: FixtureTags<'_>) -> PathBuf {
    let path = dir.join(file_name);
    write_silent_wav(&path);

    let mut tag = Tag::new(TagType::Id3v2);
    if let Some(title) = tags.title {
        tag.set_title(title.to_string());
    }
    if let Some(artist) = tags.artist {
        tag.set_artist(artist.to_string());
    }
    if let Some(album) = tags.album {
        tag.set_album(album.to_string());
    }
    if let Some(album_artist) = tags.album_artist {
        tag.insert_text(ItemKey::AlbumArtist, album_artist.to_string());
    }
    if let Some(composer) = tags.composer {
        tag.insert_text(ItemKey::Composer, composer.to_string());
    }

    tag.save_to_path(&path).expect("Failed to write tag");
    path
}

/// Write a file with an audio extension that no tag reader accepts
pub fn write_broken_file(dir: &Path, file_name: &str) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, b"not really audio").expect("Failed to write file");
    path
}
