//! Ingest a directory of movie files into the catalog database.
//!
//! This crate owns the pipeline that turns filenames into catalog rows:
//! deriving search terms, looking movies up through a metadata source,
//! downloading artwork, and persisting the result.

pub mod ingest;
pub mod progress;

pub use ingest::{
    IngestError, IngestOptions, IngestStats, ingest_directory, ingest_files, list_media_files,
};
pub use progress::{IngestProgress, LogIngestProgress, SilentIngestProgress};
