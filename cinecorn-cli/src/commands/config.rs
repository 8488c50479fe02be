use cinecorn_scraper::{ConfigSource, ProviderConfig};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::cli_types::ProviderArgs;

fn mask_value(s: &str) -> String {
    let head: String = s.chars().take(2).collect();
    if s.chars().count() <= 2 {
        "****".to_string()
    } else {
        format!("{}****", head)
    }
}

/// Show the provider settings and where each one comes from.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = cinecorn_scraper::config_path();
    let sources = cinecorn_scraper::config_sources();

    log::info!(
        "{}",
        "Metadata Provider Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    crate::log_blank();

    // load() fails when the base URL is missing; show the other fields anyway.
    let config = match ProviderConfig::load() {
        Ok(config) => Some(config),
        Err(e) => {
            log::debug!("Provider config incomplete: {}", e);
            None
        }
    };

    let value = |source: &ConfigSource, loaded: Option<String>, is_secret: bool| match source {
        ConfigSource::Missing => None,
        _ => loaded.map(|v| if is_secret { mask_value(&v) } else { v }),
    };

    let fields = [
        (
            "base_url",
            &sources.base_url,
            value(
                &sources.base_url,
                config.as_ref().map(|c| c.base_url.clone()),
                false,
            ),
        ),
        (
            "api_key",
            &sources.api_key,
            value(
                &sources.api_key,
                config.as_ref().and_then(|c| c.api_key.clone()),
                true,
            ),
        ),
        (
            "timeout_secs",
            &sources.timeout_secs,
            value(
                &sources.timeout_secs,
                config.as_ref().map(|c| c.timeout_secs.to_string()),
                false,
            ),
        ),
    ];

    for (name, source, value) in &fields {
        let source_str = format!("({})", source);
        match value {
            Some(v) => log::info!(
                "  {:<14} {} {}",
                name,
                v,
                source_str.if_supports_color(Stdout, |t| t.dimmed()),
            ),
            None => log::info!(
                "  {:<14} {}",
                name,
                "not set".if_supports_color(Stdout, |t| t.yellow()),
            ),
        }
    }

    if config.is_none() {
        crate::log_blank();
        log::warn!(
            "No provider URL configured. Set CINECORN_PROVIDER_URL or run \
             'cinecorn config set --provider-url <url>'."
        );
    }

    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    let path = cinecorn_scraper::config_path()
        .ok_or_else(|| CliError::config("Could not determine config directory"))?;
    println!("{}", path.display());
    Ok(())
}

/// Save provider settings to the config file.
///
/// Values not given on the command line keep whatever the environment or the
/// existing file currently resolves to.
pub(crate) fn run_config_set(
    provider: ProviderArgs,
    timeout_secs: Option<u64>,
) -> Result<(), CliError> {
    let mut config = super::load_provider_config(provider)?;
    if let Some(secs) = timeout_secs {
        config.timeout_secs = secs;
    }

    let path =
        cinecorn_scraper::save_to_file(&config).map_err(|e| CliError::config(e.to_string()))?;
    log::info!(
        "{} {}",
        "Saved provider settings to".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
    Ok(())
}
