//! CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] rank_core::CatalogError),

    #[error("Import error: {0}")]
    Import(#[from] rank_importer::ImportError),

    #[error("Track not found: {0}")]
    TrackNotFound(rank_core::TrackId),
}
