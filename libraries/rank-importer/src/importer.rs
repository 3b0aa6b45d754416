//! Main importer orchestration - brings together scanning, metadata extraction and reconciliation

use crate::{
    metadata, scanner::FileScanner, ImportConfig, ImportError, ImportProgress, ImportSummary,
    Result,
};
use rank_core::CatalogStore;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::sync::mpsc;

/// Imports music files into a catalog, one file at a time
pub struct CatalogImporter<S> {
    store: S,
    config: ImportConfig,
    progress: Option<mpsc::Sender<ImportProgress>>,
}

impl<S: CatalogStore> CatalogImporter<S> {
    /// Create a new importer on top of `store`
    pub fn new(store: S, config: ImportConfig) -> Self {
        Self {
            store,
            config,
            progress: None,
        }
    }

    /// Send progress updates to `tx` while importing
    pub fn with_progress(mut self, tx: mpsc::Sender<ImportProgress>) -> Self {
        self.progress = Some(tx);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Import every audio file under `directory`
    pub async fn import_directory(&self, directory: &Path) -> Result<ImportSummary> {
        let files = FileScanner::from_config(&self.config).scan_directory(directory)?;
        tracing::info!(
            "Importing {} files from {}",
            files.len(),
            directory.display()
        );

        Ok(self.import_files(&files).await)
    }

    /// Import specific files, in the given order
    ///
    /// A file that cannot be read or reconciled is recorded in the summary and
    /// the import moves on, unless `stop_on_error` is set.
    pub async fn import_files(&self, files: &[PathBuf]) -> ImportSummary {
        let start_time = Instant::now();
        let mut summary = ImportSummary::default();
        let mut progress = ImportProgress::new(files.len());

        self.send_progress(&progress).await;

        for file_path in files {
            progress.current_file = Some(file_path.clone());
            self.send_progress(&progress).await;

            match self.import_single_file(file_path).await {
                Ok(outcome) => {
                    tracing::debug!("Imported {:?} as track {}", file_path, outcome.track_id);
                    summary.record_status(outcome.status);
                    summary.conflicts += outcome.conflicts.len();
                }
                Err(e) => {
                    tracing::warn!("Failed to import {:?}: {}", file_path, e);
                    summary.errors.push((file_path.clone(), e.to_string()));
                    summary.failed += 1;
                    progress.failed_imports += 1;
                }
            }

            summary.total_processed += 1;
            progress.processed_files += 1;
            self.send_progress(&progress).await;

            if self.config.stop_on_error && summary.failed > 0 {
                summary.stopped_early = true;
                break;
            }
        }

        summary.duration_seconds = start_time.elapsed().as_secs();
        tracing::info!("{}", summary.summary_text());

        summary
    }

    async fn import_single_file(&self, file_path: &Path) -> Result<rank_core::ReconcileOutcome> {
        let record = metadata::extract_record(file_path)?;
        self.store.reconcile(&record).await.map_err(ImportError::from)
    }

    async fn send_progress(&self, progress: &ImportProgress) {
        if let Some(tx) = &self.progress {
            // A dropped receiver only means nobody is watching
            let _ = tx.send(progress.clone()).await;
        }
    }
}
