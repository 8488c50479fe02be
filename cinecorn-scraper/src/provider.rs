//! Narrow interfaces over the metadata provider and the artwork host.
//!
//! The ingestion pipeline only talks to these traits, so it can run against
//! fixtures as easily as against [`MetadataClient`](crate::MetadataClient).

use crate::error::ScrapeError;
use crate::types::{RawMovie, SearchHit};

/// A source of movie metadata.
pub trait MetadataSource {
    /// Candidate matches for a free-text term, best match first.
    fn search(&self, term: &str) -> Result<Vec<SearchHit>, ScrapeError>;

    /// The full detail record for a provider id.
    fn fetch_details(&self, id: &str) -> Result<RawMovie, ScrapeError>;
}

/// A source of artwork bytes.
pub trait ArtworkSource {
    /// Download a resource. Non-success responses are [`ScrapeError::Fetch`].
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ScrapeError>;
}
