use cinecorn_catalog::types::MovieRecord;
use cinecorn_scraper::MetadataClient;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::cli_types::ProviderArgs;

/// Look a term up with the metadata provider and print the normalized record.
pub(crate) fn run_lookup(term: &str, json: bool, provider: ProviderArgs) -> Result<(), CliError> {
    let config = super::load_provider_config(provider)?;
    let client = MetadataClient::new(&config).map_err(|e| CliError::config(e.to_string()))?;

    let record = cinecorn_scraper::lookup_movie(&client, term).map_err(|e| {
        if e.is_not_found() {
            CliError::lookup(format!("No match for '{}'", term))
        } else {
            CliError::lookup(e.to_string())
        }
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_record(&record);
    }
    Ok(())
}

fn print_record(record: &MovieRecord) {
    log::info!(
        "{} ({})",
        record.title.if_supports_color(Stdout, |t| t.bold()),
        record.year,
    );
    log::info!("  Id:       {}", record.mid);
    log::info!("  Index:    {}", record.idx);
    log::info!("  Runtime:  {} min", record.runtime);
    log::info!("  Rating:   {:.1}", record.rating);
    if !record.genres.is_empty() {
        log::info!("  Genres:   {}", record.genres.join(", "));
    }
    if !record.summary.is_empty() {
        log::info!("  Summary:  {}", record.summary);
    }

    if !record.crew.is_empty() {
        crate::log_blank();
        log::info!("{}", "Directed by".if_supports_color(Stdout, |t| t.bold()));
        for (pid, name) in &record.crew {
            log::info!("  {} {}", name, pid.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
    if !record.cast.is_empty() {
        crate::log_blank();
        log::info!("{}", "Cast".if_supports_color(Stdout, |t| t.bold()));
        for (pid, name) in &record.cast {
            log::info!("  {} {}", name, pid.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }

    crate::log_blank();
    match (&record.artwork.thumb, &record.artwork.image) {
        (None, None) => log::info!(
            "  {}",
            "No artwork".if_supports_color(Stdout, |t| t.dimmed())
        ),
        (thumb, image) => {
            if let Some(url) = thumb {
                log::info!("  Thumb:    {}", url.if_supports_color(Stdout, |t| t.cyan()));
            }
            if let Some(url) = image {
                log::info!("  Image:    {}", url.if_supports_color(Stdout, |t| t.cyan()));
            }
        }
    }
}
