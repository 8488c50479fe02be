//! Artwork URL derivation.
//!
//! Provider cover images are served from a resizing CDN: everything up to and
//! including the `._V1.` marker identifies the image, and the suffix selects a
//! rendition. Replacing the suffix with `_SX<width>.jpg` yields a JPEG scaled
//! to that width.

use crate::types::ArtworkUrls;

/// Width in pixels of the thumbnail rendition.
pub const THUMB_WIDTH: u32 = 95;
/// Width in pixels of the full image rendition.
pub const IMAGE_WIDTH: u32 = 300;

const RENDITION_MARKER: &str = "._V1.";

/// Derive the thumbnail and full image URLs from a cover URL.
///
/// The cover URL must look like `http://<host>/<path>._V1.<anything>`. If it
/// does not, both derived URLs are `None`.
///
/// ```
/// use cinecorn_catalog::artwork::derive_artwork_urls;
///
/// let urls = derive_artwork_urls("http://ia.example.com/images/M/MV5B._V1._SX214_.jpg");
/// assert_eq!(urls.thumb.as_deref(), Some("http://ia.example.com/images/M/MV5B._V1._SX95.jpg"));
/// assert_eq!(urls.image.as_deref(), Some("http://ia.example.com/images/M/MV5B._V1._SX300.jpg"));
/// ```
pub fn derive_artwork_urls(cover_url: &str) -> ArtworkUrls {
    match rendition_prefix(cover_url) {
        Some(prefix) => ArtworkUrls {
            thumb: Some(sized_url(prefix, THUMB_WIDTH)),
            image: Some(sized_url(prefix, IMAGE_WIDTH)),
        },
        None => ArtworkUrls::default(),
    }
}

fn sized_url(prefix: &str, width: u32) -> String {
    format!("{prefix}_SX{width}.jpg")
}

/// The part of `url` up to and including the last `._V1.` marker.
fn rendition_prefix(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))?;
    let scheme_len = url.len() - rest.len();

    // The host must be followed by a path that holds the marker.
    let host_end = rest.find('/')?;
    if host_end == 0 {
        return None;
    }
    let path = &rest[host_end..];
    let marker = path.rfind(RENDITION_MARKER)?;

    let end = scheme_len + host_end + marker + RENDITION_MARKER.len();
    Some(&url[..end])
}

/// The final path segment of a URL, without query string or fragment.
///
/// ```
/// use cinecorn_catalog::artwork::url_file_name;
///
/// assert_eq!(url_file_name("http://host/a/b/cover.jpg?x=1"), Some("cover.jpg"));
/// assert_eq!(url_file_name("http://host/a/"), None);
/// ```
pub fn url_file_name(url: &str) -> Option<&str> {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let without_query = without_fragment
        .split('?')
        .next()
        .unwrap_or(without_fragment);
    let after_scheme = without_query
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(without_query);
    let (_, path) = after_scheme.split_once('/')?;
    path.rsplit('/').next().filter(|segment| !segment.is_empty())
}
