//! Naming rules for media files and catalog index letters.
//!
//! Media files are named after the movie they contain:
//! ```text
//! The Good, the Bad and the Ugly.avi
//! ```
//!
//! The search term is the filename without its final extension. The index
//! letter used for alphabetic grouping is the first letter of the search term
//! once a leading article has been dropped.

use thiserror::Error;

/// Leading words dropped before picking the index letter. Matched
/// case-sensitively and only when followed by a space.
pub const LEADING_ARTICLES: &[&str] = &[
    "The", "A", "An", "Of", "At", "On", "It's", "La", "Le", "Les", "Dos", "Los", "Der",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Filename has no extension: {0}")]
    MissingExtension(String),
    #[error("Filename has an empty name before its extension: {0}")]
    EmptySearchTerm(String),
}

/// Strip the final extension from a media filename.
///
/// # Examples
///
/// ```
/// use cinecorn_catalog::name_parser::search_term;
///
/// assert_eq!(search_term("Aliens.avi").unwrap(), "Aliens");
/// assert_eq!(search_term("Dr. Strangelove.mkv").unwrap(), "Dr. Strangelove");
/// assert!(search_term("Terminator").is_err());
/// ```
pub fn search_term(filename: &str) -> Result<String, NameError> {
    let (stem, _ext) = filename
        .rsplit_once('.')
        .ok_or_else(|| NameError::MissingExtension(filename.to_string()))?;
    if stem.is_empty() {
        return Err(NameError::EmptySearchTerm(filename.to_string()));
    }
    Ok(stem.to_string())
}

/// Map every filename to its search term, preserving order.
///
/// Fails on the first filename without an extension.
pub fn search_terms<S: AsRef<str>>(filenames: &[S]) -> Result<Vec<String>, NameError> {
    filenames.iter().map(|f| search_term(f.as_ref())).collect()
}

/// Drop a single leading article from a search term.
pub fn strip_leading_article(term: &str) -> &str {
    for article in LEADING_ARTICLES {
        if let Some(rest) = term
            .strip_prefix(article)
            .and_then(|rest| rest.strip_prefix(' '))
        {
            return rest;
        }
    }
    term
}

/// Derive the upper-cased index letter for a search term.
///
/// Returns `None` if nothing is left after stripping the article.
///
/// ```
/// use cinecorn_catalog::name_parser::index_letter;
///
/// assert_eq!(index_letter("The Good, the Bad and the Ugly").as_deref(), Some("G"));
/// assert_eq!(index_letter("aliens").as_deref(), Some("A"));
/// ```
pub fn index_letter(term: &str) -> Option<String> {
    strip_leading_article(term)
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
}
