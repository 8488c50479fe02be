use std::path::PathBuf;

use crate::error::ScrapeError;

pub const ENV_PROVIDER_URL: &str = "CINECORN_PROVIDER_URL";
pub const ENV_API_KEY: &str = "CINECORN_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "CINECORN_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the metadata provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

/// Where a config field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Hard-coded default value.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each config field.
#[derive(Debug)]
pub struct ConfigSources {
    pub base_url: ConfigSource,
    pub api_key: ConfigSource,
    pub timeout_secs: ConfigSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    provider: Option<ProviderSection>,
}

#[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
struct ProviderSection {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout_secs: Option<u64>,
}

impl ProviderConfig {
    /// Load settings from environment variables or the config file.
    ///
    /// Priority: env vars > config file > defaults.
    /// Required: base_url. Optional: api_key. timeout_secs defaults to 30.
    pub fn load() -> Result<Self, ScrapeError> {
        Self::load_with_overrides(None, None)
    }

    /// Like [`ProviderConfig::load`], but explicit values (e.g. from CLI args)
    /// take priority over everything else. A base URL given here satisfies
    /// the requirement even when nothing else sets one.
    pub fn load_with_overrides(
        base_url: Option<String>,
        api_key: Option<String>,
    ) -> Result<Self, ScrapeError> {
        let env = |name: &str| std::env::var(name).ok();
        resolve(&env, load_config_file(), base_url, api_key)
    }

    /// Replace fields with explicit values.
    pub fn with_overrides(mut self, base_url: Option<String>, api_key: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(key) = api_key {
            self.api_key = Some(key);
        }
        self
    }
}

fn resolve(
    env: &dyn Fn(&str) -> Option<String>,
    file: Option<ProviderSection>,
    base_url: Option<String>,
    api_key: Option<String>,
) -> Result<ProviderConfig, ScrapeError> {
    let file = file.unwrap_or_default();

    let base_url = base_url
        .or_else(|| env(ENV_PROVIDER_URL))
        .or(file.base_url)
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            ScrapeError::Config(format!(
                "Missing provider base URL. Set {ENV_PROVIDER_URL}, pass --provider-url, \
                 or add base_url to the [provider] table of the config file"
            ))
        })?;

    let api_key = api_key.or_else(|| env(ENV_API_KEY)).or(file.api_key);

    let timeout_secs = match env(ENV_TIMEOUT_SECS) {
        Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
            ScrapeError::Config(format!(
                "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"
            ))
        })?,
        None => file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
    };

    Ok(ProviderConfig {
        base_url,
        api_key,
        timeout_secs,
    })
}

/// Return the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cinecorn").join("config.toml"))
}

/// Save provider settings to the config file, creating parent directories as
/// needed. The default timeout is not written out.
/// Returns the path the file was written to.
pub fn save_to_file(config: &ProviderConfig) -> Result<PathBuf, ScrapeError> {
    let path = config_path().ok_or_else(|| {
        ScrapeError::Config("Could not determine config directory".to_string())
    })?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(&path, to_toml(config)?)?;
    Ok(path)
}

fn to_toml(config: &ProviderConfig) -> Result<String, ScrapeError> {
    let file = ConfigFile {
        provider: Some(ProviderSection {
            base_url: Some(config.base_url.clone()),
            api_key: config.api_key.clone(),
            timeout_secs: (config.timeout_secs != DEFAULT_TIMEOUT_SECS)
                .then_some(config.timeout_secs),
        }),
    };

    toml::to_string_pretty(&file)
        .map_err(|e| ScrapeError::Config(format!("Failed to serialize config: {}", e)))
}

/// Determine where each config field is coming from.
pub fn config_sources() -> ConfigSources {
    let env = |name: &str| std::env::var(name).ok();
    sources(&env, load_config_file().as_ref())
}

fn sources(env: &dyn Fn(&str) -> Option<String>, file: Option<&ProviderSection>) -> ConfigSources {
    let pick = |var: &'static str, in_file: bool, fallback: ConfigSource| {
        if env(var).is_some() {
            ConfigSource::EnvVar(var)
        } else if in_file {
            ConfigSource::ConfigFile
        } else {
            fallback
        }
    };

    ConfigSources {
        base_url: pick(
            ENV_PROVIDER_URL,
            file.is_some_and(|f| f.base_url.is_some()),
            ConfigSource::Missing,
        ),
        api_key: pick(
            ENV_API_KEY,
            file.is_some_and(|f| f.api_key.is_some()),
            ConfigSource::Missing,
        ),
        timeout_secs: pick(
            ENV_TIMEOUT_SECS,
            file.is_some_and(|f| f.timeout_secs.is_some()),
            ConfigSource::Default,
        ),
    }
}

fn load_config_file() -> Option<ProviderSection> {
    let path = config_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Option<ProviderSection> {
    match toml::from_str::<ConfigFile>(content) {
        Ok(config) => config.provider,
        Err(e) => {
            log::warn!("Ignoring unreadable config file: {}", e);
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
