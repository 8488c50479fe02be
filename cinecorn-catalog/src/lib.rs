//! Movie catalog data model types and filename/metadata naming rules.
//!
//! This crate defines the persistent data model for the movie catalog without
//! any database or network dependencies. Consumers can use these types directly
//! for serialization, display, or passing to `cinecorn-db` for persistence.

pub mod artwork;
pub mod name_parser;
pub mod types;

pub use artwork::{IMAGE_WIDTH, THUMB_WIDTH, derive_artwork_urls, url_file_name};
pub use name_parser::{NameError, index_letter, search_term, search_terms, strip_leading_article};
pub use types::*;
