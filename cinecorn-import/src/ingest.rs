//! The ingestion pipeline.
//!
//! Files are processed one at a time, in name order:
//!
//! 1. derive the search term from the filename
//! 2. skip files that are already cataloged
//! 3. look the movie up through the [`MetadataSource`]
//! 4. download the thumbnail and full image
//! 5. write the movie, its people, credits, and genres in one transaction
//!
//! A file that fails in steps 1, 3, or 4 is counted and left uncataloged, so
//! the next run retries it. Database errors stop the run.

use std::path::Path;

use cinecorn_catalog::name_parser::search_term;
use cinecorn_catalog::types::{ArtworkPaths, MovieRecord};
use cinecorn_db::{CatalogStore, OperationError};
use cinecorn_scraper::{ArtworkFetcher, ArtworkSource, MetadataSource, lookup_movie};
use thiserror::Error;

use crate::progress::IngestProgress;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Stopped at '{filename}': {reason}")]
    Aborted { filename: String, reason: String },
}

/// Options for an ingestion run.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Look movies up but write nothing, neither rows nor artwork.
    pub dry_run: bool,
    /// Download artwork when an artwork source is supplied.
    pub download_artwork: bool,
    /// Stop at the first failed file instead of moving on.
    pub fail_fast: bool,
    /// Maximum number of files to process.
    pub limit: Option<usize>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            download_artwork: true,
            fail_fast: false,
            limit: None,
        }
    }
}

/// Statistics from an ingestion run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestStats {
    pub files_seen: usize,
    /// Movies written (or, in a dry run, movies that would be written).
    pub cataloged: usize,
    pub already_cataloged: usize,
    pub not_found: usize,
    pub errors: usize,
    pub artwork_downloaded: usize,
    pub people_added: usize,
    pub links_added: usize,
}

/// List the media files in `dir`, sorted by name.
///
/// Only regular files directly inside `dir` are returned. Hidden files and
/// names that are not valid UTF-8 are skipped.
pub fn list_media_files(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                log::warn!("Skipping non-UTF-8 filename: {}", raw.to_string_lossy());
                continue;
            }
        };
        if name.starts_with('.') {
            continue;
        }
        files.push(name);
    }
    files.sort();
    Ok(files)
}

/// List `dir` and ingest every media file in it.
pub fn ingest_directory(
    store: &CatalogStore<'_>,
    source: &dyn MetadataSource,
    artwork: Option<(&ArtworkFetcher, &dyn ArtworkSource)>,
    dir: &Path,
    options: &IngestOptions,
    progress: &dyn IngestProgress,
) -> Result<IngestStats, IngestError> {
    let files = list_media_files(dir)?;
    log::debug!("Found {} files in {}", files.len(), dir.display());
    ingest_files(store, source, artwork, &files, options, progress)
}

/// Ingest the given filenames into the catalog.
pub fn ingest_files<S: AsRef<str>>(
    store: &CatalogStore<'_>,
    source: &dyn MetadataSource,
    artwork: Option<(&ArtworkFetcher, &dyn ArtworkSource)>,
    files: &[S],
    options: &IngestOptions,
    progress: &dyn IngestProgress,
) -> Result<IngestStats, IngestError> {
    let mut stats = IngestStats::default();
    let total = options
        .limit
        .map_or(files.len(), |limit| limit.min(files.len()));

    for (i, filename) in files.iter().take(total).enumerate() {
        let filename = filename.as_ref();
        stats.files_seen += 1;
        progress.on_file(i + 1, total, filename);

        let term = match search_term(filename) {
            Ok(term) => term,
            Err(e) => {
                fail(&mut stats, options, progress, filename, e.to_string())?;
                continue;
            }
        };

        if store.contains(filename)? {
            stats.already_cataloged += 1;
            progress.on_skipped(filename);
            continue;
        }

        let record = match lookup_movie(source, &term) {
            Ok(record) => record,
            Err(e) if e.is_not_found() => {
                stats.not_found += 1;
                progress.on_not_found(filename, &term);
                continue;
            }
            Err(e) => {
                fail(&mut stats, options, progress, filename, e.to_string())?;
                continue;
            }
        };

        if options.dry_run {
            stats.cataloged += 1;
            progress.on_cataloged(filename, &record);
            continue;
        }

        let paths = match download_artwork(artwork, options, &record) {
            Ok(paths) => paths,
            Err(reason) => {
                fail(&mut stats, options, progress, filename, reason)?;
                continue;
            }
        };
        stats.artwork_downloaded += paths.count();

        let outcome = store.persist_record(filename, &record, &paths)?;
        if outcome.movie_inserted {
            stats.cataloged += 1;
            stats.people_added += outcome.people_added;
            stats.links_added += outcome.links_added;
            progress.on_cataloged(filename, &record);
        } else {
            // Another file already holds this movie or its artwork.
            log::warn!(
                "'{}' resolved to {} which is already cataloged",
                filename,
                record.mid
            );
            stats.already_cataloged += 1;
            progress.on_skipped(filename);
        }
    }

    progress.on_complete(&stats);
    Ok(stats)
}

fn download_artwork(
    artwork: Option<(&ArtworkFetcher, &dyn ArtworkSource)>,
    options: &IngestOptions,
    record: &MovieRecord,
) -> Result<ArtworkPaths, String> {
    match artwork {
        Some((fetcher, host)) if options.download_artwork => fetcher
            .fetch_all(host, &record.artwork)
            .map_err(|e| e.to_string()),
        _ => Ok(ArtworkPaths::default()),
    }
}

fn fail(
    stats: &mut IngestStats,
    options: &IngestOptions,
    progress: &dyn IngestProgress,
    filename: &str,
    reason: String,
) -> Result<(), IngestError> {
    stats.errors += 1;
    progress.on_error(filename, &reason);
    if options.fail_fast {
        return Err(IngestError::Aborted {
            filename: filename.to_string(),
            reason,
        });
    }
    Ok(())
}
