//! Data model types for the movie catalog.
//!
//! These types represent the normalized metadata produced by a lookup and the
//! persistent catalog schema: movies, people, and their relationships.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ── Metadata Record ─────────────────────────────────────────────────────────

/// A normalized movie record, as extracted from the metadata provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Provider's canonical movie identifier.
    pub mid: String,
    /// Verbatim provider title (may be localized).
    pub title: String,
    /// Alphabetic index letter derived from the search term.
    pub idx: String,
    pub year: i32,
    /// Runtime in minutes.
    pub runtime: i32,
    pub rating: f64,
    /// Short plot outline, empty when the provider has none.
    #[serde(default)]
    pub summary: String,
    pub artwork: ArtworkUrls,
    /// Actors keyed by person id.
    #[serde(default)]
    pub cast: BTreeMap<String, String>,
    /// Directors keyed by person id.
    #[serde(default)]
    pub crew: BTreeMap<String, String>,
    /// Genre names in provider order.
    #[serde(default)]
    pub genres: Vec<String>,
}

impl MovieRecord {
    /// Iterate over every credited person with their role.
    pub fn people(&self) -> impl Iterator<Item = (Role, &str, &str)> {
        let actors = self
            .cast
            .iter()
            .map(|(pid, name)| (Role::Actor, pid.as_str(), name.as_str()));
        let directors = self
            .crew
            .iter()
            .map(|(pid, name)| (Role::Director, pid.as_str(), name.as_str()));
        actors.chain(directors)
    }
}

/// Sized artwork URLs derived from the provider's cover image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkUrls {
    pub thumb: Option<String>,
    pub image: Option<String>,
}

impl ArtworkUrls {
    pub fn is_empty(&self) -> bool {
        self.thumb.is_none() && self.image.is_none()
    }
}

/// Local paths of downloaded artwork.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtworkPaths {
    pub thumb: Option<PathBuf>,
    pub image: Option<PathBuf>,
}

impl ArtworkPaths {
    pub fn count(&self) -> usize {
        usize::from(self.thumb.is_some()) + usize::from(self.image.is_some())
    }
}

// ── Movie ───────────────────────────────────────────────────────────────────

/// A row of the `movies` table. A movie is fully determined by its filename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub filename: String,
    pub idx: String,
    pub mid: String,
    pub thumb_path: Option<String>,
    pub image_path: Option<String>,
    pub title: String,
    pub runtime: i32,
    pub year: i32,
    pub rating: f64,
    pub summary: Option<String>,
}

impl Movie {
    /// Build the row for `filename` from a lookup record and its downloaded artwork.
    pub fn from_record(filename: &str, record: &MovieRecord, artwork: &ArtworkPaths) -> Self {
        Self {
            filename: filename.to_string(),
            idx: record.idx.clone(),
            mid: record.mid.clone(),
            thumb_path: artwork.thumb.as_ref().map(|p| p.display().to_string()),
            image_path: artwork.image.as_ref().map(|p| p.display().to_string()),
            title: record.title.clone(),
            runtime: record.runtime,
            year: record.year,
            rating: record.rating,
            summary: if record.summary.is_empty() {
                None
            } else {
                Some(record.summary.clone())
            },
        }
    }
}

// ── People ──────────────────────────────────────────────────────────────────

/// A row of the `people` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub pid: String,
    pub name: String,
}

/// Capacity in which a person is credited on a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Actor,
    Director,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Actor => "actor",
            Role::Director => "director",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
