//! Ingestion progress reporting.

use cinecorn_catalog::types::MovieRecord;

use crate::ingest::IngestStats;

/// Trait for receiving ingestion progress updates.
pub trait IngestProgress {
    /// Called before each file is processed. `current` is 1-based.
    fn on_file(&self, current: usize, total: usize, filename: &str);

    /// Called when a file's movie was cataloged (or would be, in a dry run).
    fn on_cataloged(&self, filename: &str, record: &MovieRecord);

    /// Called when a file was already in the catalog.
    fn on_skipped(&self, filename: &str);

    /// Called when the provider had no match for a file's search term.
    fn on_not_found(&self, filename: &str, term: &str);

    /// Called when a file failed and was left uncataloged.
    fn on_error(&self, filename: &str, error: &str);

    /// Called once after the last file.
    fn on_complete(&self, stats: &IngestStats);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentIngestProgress;

impl IngestProgress for SilentIngestProgress {
    fn on_file(&self, _current: usize, _total: usize, _filename: &str) {}
    fn on_cataloged(&self, _filename: &str, _record: &MovieRecord) {}
    fn on_skipped(&self, _filename: &str) {}
    fn on_not_found(&self, _filename: &str, _term: &str) {}
    fn on_error(&self, _filename: &str, _error: &str) {}
    fn on_complete(&self, _stats: &IngestStats) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogIngestProgress;

impl IngestProgress for LogIngestProgress {
    fn on_file(&self, current: usize, total: usize, filename: &str) {
        log::debug!("[{}/{}] {}", current, total, filename);
    }

    fn on_cataloged(&self, filename: &str, record: &MovieRecord) {
        log::info!(
            "{} -> {} ({}, {})",
            filename,
            record.title,
            record.year,
            record.mid
        );
    }

    fn on_skipped(&self, filename: &str) {
        log::debug!("{} already cataloged", filename);
    }

    fn on_not_found(&self, filename: &str, term: &str) {
        log::warn!("{}: no match for '{}'", filename, term);
    }

    fn on_error(&self, filename: &str, error: &str) {
        log::error!("{}: {}", filename, error);
    }

    fn on_complete(&self, stats: &IngestStats) {
        log::info!(
            "Ingested {} files: {} cataloged, {} already cataloged, {} not found, {} errors",
            stats.files_seen,
            stats.cataloged,
            stats.already_cataloged,
            stats.not_found,
            stats.errors
        );
    }
}
