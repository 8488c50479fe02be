use std::path::{Path, PathBuf};

use cinecorn_catalog::artwork::url_file_name;
use cinecorn_catalog::types::{ArtworkPaths, ArtworkUrls};

use crate::error::ScrapeError;
use crate::provider::ArtworkSource;

/// The two artwork renditions kept per movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtworkKind {
    Thumb,
    Image,
}

impl ArtworkKind {
    /// Subdirectory of the output directory this kind is stored in.
    pub fn subdir(self) -> &'static str {
        match self {
            Self::Thumb => "thumbs",
            Self::Image => "images",
        }
    }
}

/// Downloads artwork into `<output_dir>/thumbs` and `<output_dir>/images`.
#[derive(Debug, Clone)]
pub struct ArtworkFetcher {
    output_dir: PathBuf,
}

impl ArtworkFetcher {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn dir_for(&self, kind: ArtworkKind) -> PathBuf {
        self.output_dir.join(kind.subdir())
    }

    /// Download one image and store it under the URL's final path segment.
    ///
    /// An existing file of the same name is overwritten.
    pub fn fetch(
        &self,
        source: &dyn ArtworkSource,
        kind: ArtworkKind,
        url: &str,
    ) -> Result<PathBuf, ScrapeError> {
        let file_name = url_file_name(url)
            .ok_or_else(|| ScrapeError::fetch(url, "URL has no file name"))?;

        let bytes = source.fetch_bytes(url)?;

        let dir = self.dir_for(kind);
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(file_name);
        std::fs::write(&path, &bytes)?;

        log::debug!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }

    /// Download whichever renditions `urls` names.
    ///
    /// Stops at the first failure; a thumbnail already written is left on disk.
    pub fn fetch_all(
        &self,
        source: &dyn ArtworkSource,
        urls: &ArtworkUrls,
    ) -> Result<ArtworkPaths, ScrapeError> {
        let thumb = urls
            .thumb
            .as_deref()
            .map(|url| self.fetch(source, ArtworkKind::Thumb, url))
            .transpose()?;
        let image = urls
            .image
            .as_deref()
            .map(|url| self.fetch(source, ArtworkKind::Image, url))
            .transpose()?;

        Ok(ArtworkPaths { thumb, image })
    }
}

#[cfg(test)]
#[path = "tests/media_tests.rs"]
mod tests;
