use std::collections::BTreeMap;

use cinecorn_catalog::artwork::derive_artwork_urls;
use cinecorn_catalog::name_parser::index_letter;
use cinecorn_catalog::types::{ArtworkUrls, MovieRecord};

use crate::error::ScrapeError;
use crate::provider::MetadataSource;
use crate::types::{Credit, LooseNumber, RawMovie};

/// Longest provider id the catalog stores.
pub const MAX_ID_LEN: usize = 9;

/// Look up a movie by search term.
///
/// The provider's ranking is trusted: the first search hit is taken and its
/// detail record is normalized. No hits is [`ScrapeError::NotFound`]; provider
/// and network errors are returned as-is without retrying.
pub fn lookup_movie(source: &dyn MetadataSource, term: &str) -> Result<MovieRecord, ScrapeError> {
    let hits = source.search(term)?;
    let total = hits.len();
    let first = hits.into_iter().next().ok_or_else(|| ScrapeError::NotFound {
        term: term.to_string(),
    })?;

    log::debug!(
        "'{}' matched '{}' ({}) out of {} candidates",
        term,
        first.title,
        first.id,
        total,
    );

    let raw = source.fetch_details(&first.id)?;
    normalize(term, &raw)
}

/// Turn a provider record into a catalog record.
///
/// The index letter comes from `term`, not from the provider title, so that
/// localized titles still file under the name the user gave the file.
pub fn normalize(term: &str, raw: &RawMovie) -> Result<MovieRecord, ScrapeError> {
    let mid = raw.id.trim();
    if mid.is_empty() || mid.chars().count() > MAX_ID_LEN {
        return Err(ScrapeError::malformed("id", raw.id.as_str()));
    }

    let title = raw
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ScrapeError::malformed("title", raw.title.clone().unwrap_or_default()))?;

    let idx = index_letter(term).ok_or_else(|| ScrapeError::malformed("idx", term))?;

    let year = whole_number("year", raw.year.as_ref())?;
    let runtime = whole_number("runtimes", raw.runtimes.first())?;
    let rating = raw
        .rating
        .as_ref()
        .and_then(LooseNumber::as_f64)
        .ok_or_else(|| ScrapeError::malformed("rating", describe(raw.rating.as_ref())))?;

    let artwork = match raw.cover_url.as_deref() {
        Some(cover) => {
            let urls = derive_artwork_urls(cover);
            if urls.is_empty() {
                log::debug!("Cover URL for {mid} has no sized renditions: {cover}");
            }
            urls
        }
        None => ArtworkUrls::default(),
    };

    Ok(MovieRecord {
        mid: mid.to_string(),
        title: title.to_string(),
        idx,
        year,
        runtime,
        rating,
        summary: raw.plot_outline.clone().unwrap_or_default(),
        artwork,
        cast: credits_by_id(&raw.cast),
        crew: credits_by_id(&raw.directors),
        genres: raw.genres.clone(),
    })
}

fn whole_number(field: &'static str, value: Option<&LooseNumber>) -> Result<i32, ScrapeError> {
    value
        .and_then(LooseNumber::as_i32)
        .ok_or_else(|| ScrapeError::malformed(field, describe(value)))
}

fn describe(value: Option<&LooseNumber>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "missing".to_string())
}

/// Later credits for the same id replace earlier ones.
fn credits_by_id(credits: &[Credit]) -> BTreeMap<String, String> {
    credits
        .iter()
        .map(|c| (c.id.clone(), c.name.clone()))
        .collect()
}

#[cfg(test)]
#[path = "tests/lookup_tests.rs"]
mod tests;
