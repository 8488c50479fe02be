use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};

use crate::config::ProviderConfig;
use crate::error::ScrapeError;
use crate::provider::{ArtworkSource, MetadataSource};
use crate::types::{RawMovie, SearchHit, SearchResponse};

const USER_AGENT: &str = concat!("cinecorn/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP client for the metadata provider's JSON API.
///
/// Searches hit `{base_url}/search?q=<term>` and detail records come from
/// `{base_url}/movie/<id>`. The same client downloads artwork.
pub struct MetadataClient {
    http: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl MetadataClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ScrapeError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ScrapeError::Config(format!("Invalid provider URL '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ScrapeError::Config(format!(
                "Provider URL '{}' cannot have paths appended",
                config.base_url
            )));
        }

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Build `{base_url}/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn get_json(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<String, ScrapeError> {
        let url = self.endpoint(segments);
        let mut request = self.http.get(url.clone()).query(query);
        if let Some(ref key) = self.api_key {
            request = request.query(&[("api_key", key.as_str())]);
        }

        log::debug!("GET {url}");
        let resp = request.send()?;
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ScrapeError::InvalidCredentials(
                "API key rejected by metadata provider".to_string(),
            ));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ScrapeError::RateLimit);
        }
        if !status.is_success() {
            return Err(server_error(status, resp));
        }

        Ok(resp.text()?)
    }
}

impl MetadataSource for MetadataClient {
    fn search(&self, term: &str) -> Result<Vec<SearchHit>, ScrapeError> {
        let text = self.get_json(&["search"], &[("q", term)])?;
        let response: SearchResponse = serde_json::from_str(&text)?;
        Ok(response.results)
    }

    fn fetch_details(&self, id: &str) -> Result<RawMovie, ScrapeError> {
        let text = match self.get_json(&["movie", id], &[]) {
            Err(ScrapeError::ServerError { status: 404, .. }) => {
                return Err(ScrapeError::NotFound {
                    term: id.to_string(),
                });
            }
            other => other?,
        };
        Ok(serde_json::from_str(&text)?)
    }
}

impl ArtworkSource for MetadataClient {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ScrapeError> {
        let resp = self
            .http
            .get(url)
            .send()
            .map_err(|e| ScrapeError::fetch(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::fetch(url, format!("HTTP {status}")));
        }

        let bytes = resp.bytes().map_err(|e| ScrapeError::fetch(url, e))?;
        Ok(bytes.to_vec())
    }
}

fn server_error(status: StatusCode, resp: Response) -> ScrapeError {
    let body = resp.text().unwrap_or_default();
    ScrapeError::ServerError {
        status: status.as_u16(),
        message: body.chars().take(200).collect(),
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
