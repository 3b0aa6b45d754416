//! Importer configuration and reporting types

use rank_core::ReconcileStatus;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Import configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Follow symbolic links while scanning
    pub follow_links: bool,

    /// Maximum directory depth to scan (unlimited if `None`)
    pub max_depth: Option<usize>,

    /// Abort the import at the first failed file
    pub stop_on_error: bool,
}

/// Progress update during import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportProgress {
    /// Total number of files to import
    pub total_files: usize,

    /// Number of files processed so far
    pub processed_files: usize,

    /// Number of files that failed to import
    pub failed_imports: usize,

    /// Current file being processed
    pub current_file: Option<PathBuf>,
}

impl ImportProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            processed_files: 0,
            failed_imports: 0,
            current_file: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.processed_files >= self.total_files
    }

    pub fn percentage(&self) -> f32 {
        if self.total_files == 0 {
            return 100.0;
        }
        (self.processed_files as f32 / self.total_files as f32) * 100.0
    }
}

/// Summary of an import operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Total files processed
    pub total_processed: usize,

    /// New tracks added to the catalog
    pub created: usize,

    /// Existing tracks that gained albums or artists
    pub merged: usize,

    /// Files describing tracks the catalog already knew completely
    pub unchanged: usize,

    /// Failed to import
    pub failed: usize,

    /// Tag values ignored because the catalog already holds different ones
    pub conflicts: usize,

    /// Error messages for failed imports
    pub errors: Vec<(PathBuf, String)>,

    /// Set when `stop_on_error` cut the import short
    pub stopped_early: bool,

    /// Duration of import operation
    pub duration_seconds: u64,
}

impl ImportSummary {
    pub(crate) fn record_status(&mut self, status: ReconcileStatus) {
        match status {
            ReconcileStatus::Created => self.created += 1,
            ReconcileStatus::Merged => self.merged += 1,
            ReconcileStatus::Unchanged => self.unchanged += 1,
        }
    }

    pub fn successful(&self) -> usize {
        self.created + self.merged + self.unchanged
    }

    pub fn summary_text(&self) -> String {
        let mut text = format!(
            "Import complete: {} files, {} created, {} merged, {} unchanged, {} failed, {} conflicts",
            self.total_processed,
            self.created,
            self.merged,
            self.unchanged,
            self.failed,
            self.conflicts
        );
        if self.stopped_early {
            text.push_str(" (stopped at first failure)");
        }
        text
    }
}
