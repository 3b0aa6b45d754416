//! Rank My Music Importer
//!
//! This crate feeds music files into the catalog.
//!
//! # Features
//!
//! - File scanning (folders, individual files)
//! - Metadata extraction from audio tags into catalog records
//! - Sequential reconciliation with per-file failure reporting
//! - Progress reporting
//!
//! # Architecture
//!
//! - `scanner`: Filesystem scanning for audio files
//! - `metadata`: Tag reading and tag-to-record mapping
//! - `importer`: Orchestration of the import process

mod error;
mod types;

// Core modules
pub mod importer;
pub mod metadata;
pub mod scanner;

pub use error::ImportError;
pub use importer::CatalogImporter;
pub use types::*;

/// Re-export commonly used types
pub type Result<T> = std::result::Result<T, ImportError>;
