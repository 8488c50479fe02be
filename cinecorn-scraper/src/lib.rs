pub mod client;
pub mod config;
pub mod error;
pub mod lookup;
pub mod media;
pub mod provider;
pub mod types;

pub use client::MetadataClient;
pub use config::{
    ConfigSource, ConfigSources, ProviderConfig, config_path, config_sources, save_to_file,
};
pub use error::ScrapeError;
pub use lookup::{MAX_ID_LEN, lookup_movie, normalize};
pub use media::{ArtworkFetcher, ArtworkKind};
pub use provider::{ArtworkSource, MetadataSource};
pub use types::{Credit, LooseNumber, RawMovie, SearchHit, SearchResponse};
