//! File scanning for audio files

use crate::{ImportConfig, ImportError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions of the formats the tag reader understands
const SUPPORTED_EXTENSIONS: &[&str] = &[
    "mp3", "flac", "ogg", "opus", "m4a", "mp4", "aac", "wav", "aiff", "aif", "ape", "wv",
];

/// Scanner for audio files in directories
#[derive(Debug, Clone, Default)]
pub struct FileScanner {
    /// Whether to follow symbolic links
    follow_links: bool,

    /// Maximum depth to traverse (unlimited if `None`)
    max_depth: Option<usize>,
}

impl FileScanner {
    /// Create a new file scanner
    pub fn new() -> Self {
        Self::default()
    }

    /// Scanner configured from the import settings
    pub fn from_config(config: &ImportConfig) -> Self {
        let scanner = Self::new().follow_links(config.follow_links);
        match config.max_depth {
            Some(depth) => scanner.max_depth(depth),
            None => scanner,
        }
    }

    /// Set whether to follow symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set maximum directory depth to traverse
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Scan a directory for audio files
    ///
    /// Paths are returned sorted, so repeated imports of the same folder
    /// reconcile files in the same order. Unreadable entries are skipped.
    pub fn scan_directory(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        if !path.is_dir() {
            return Err(ImportError::InvalidPath(format!(
                "{} is not a directory",
                path.display()
            )));
        }

        let mut audio_files = Vec::new();
        let mut walker = WalkDir::new(path).follow_links(self.follow_links);

        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            if is_audio_file(entry.path()) {
                audio_files.push(entry.into_path());
            }
        }

        audio_files.sort();
        tracing::debug!(
            "Found {} audio files under {}",
            audio_files.len(),
            path.display()
        );

        Ok(audio_files)
    }
}

/// Check if a file is a supported audio file
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}
