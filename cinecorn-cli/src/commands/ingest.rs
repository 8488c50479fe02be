use std::path::Path;

use cinecorn_catalog::types::MovieRecord;
use cinecorn_db::CatalogStore;
use cinecorn_import::{IngestError, IngestOptions, IngestProgress, IngestStats};
use cinecorn_scraper::{ArtworkFetcher, ArtworkSource, MetadataClient};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::cli_types::ProviderArgs;

struct CliIngestProgress {
    bar: ProgressBar,
    dry_run: bool,
}

impl CliIngestProgress {
    fn new(quiet: bool, dry_run: bool) -> Self {
        let bar = if quiet {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
        } else {
            ProgressBar::no_length()
        };
        let style = ProgressStyle::with_template("  [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        Self { bar, dry_run }
    }
}

impl IngestProgress for CliIngestProgress {
    fn on_file(&self, current: usize, total: usize, filename: &str) {
        self.bar.set_length(total as u64);
        self.bar.set_position(current.saturating_sub(1) as u64);
        self.bar.set_message(super::truncate_str(filename, 40));
        log::debug!("[{}/{}] {}", current, total, filename);
    }

    fn on_cataloged(&self, filename: &str, record: &MovieRecord) {
        let mark = if self.dry_run { "~" } else { "\u{2714}" };
        self.bar.suspend(|| {
            log::info!(
                "  {} {} -> {} ({})",
                mark.if_supports_color(Stdout, |t| t.green()),
                filename,
                record.title.if_supports_color(Stdout, |t| t.bold()),
                record.year,
            );
        });
        self.bar.inc(1);
    }

    fn on_skipped(&self, filename: &str) {
        self.bar.suspend(|| {
            log::debug!("  {} already cataloged", filename);
        });
        self.bar.inc(1);
    }

    fn on_not_found(&self, filename: &str, term: &str) {
        self.bar.suspend(|| {
            log::info!(
                "  {} {} {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                filename.if_supports_color(Stdout, |t| t.dimmed()),
                format!("(no match for '{}')", term).if_supports_color(Stdout, |t| t.dimmed()),
            );
        });
        self.bar.inc(1);
    }

    fn on_error(&self, filename: &str, error: &str) {
        self.bar.suspend(|| {
            log::warn!(
                "  {} {}: {}",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                filename,
                error,
            );
        });
        self.bar.inc(1);
    }

    fn on_complete(&self, stats: &IngestStats) {
        self.bar.finish_and_clear();

        let heading = if self.dry_run {
            "Dry run complete"
        } else {
            "Ingest complete"
        };
        crate::log_blank();
        log::info!("{}", heading.if_supports_color(Stdout, |t| t.bold()));
        log::info!("  Files seen:        {:>6}", stats.files_seen);
        if self.dry_run {
            log::info!("  Would catalog:     {:>6}", stats.cataloged);
        } else {
            log::info!("  Cataloged:         {:>6}", stats.cataloged);
        }
        log::info!("  Already cataloged: {:>6}", stats.already_cataloged);
        log::info!("  Not found:         {:>6}", stats.not_found);
        if stats.errors > 0 {
            log::info!(
                "  Errors:            {:>6}",
                stats.errors.if_supports_color(Stdout, |t| t.red()),
            );
        }
        if !self.dry_run {
            log::info!("  Artwork files:     {:>6}", stats.artwork_downloaded);
            log::info!("  New people:        {:>6}", stats.people_added);
            log::info!("  New credits:       {:>6}", stats.links_added);
        }
    }
}

/// Look up every movie file in `movie_dir` and add it to the catalog.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run_ingest(
    db_path: &Path,
    movie_dir: &Path,
    output: &Path,
    dry_run: bool,
    no_artwork: bool,
    fail_fast: bool,
    limit: Option<usize>,
    provider: ProviderArgs,
    quiet: bool,
) -> Result<(), CliError> {
    if !movie_dir.is_dir() {
        return Err(CliError::other(format!(
            "Movie directory not found: {}",
            movie_dir.display()
        )));
    }

    let config = super::load_provider_config(provider)?;
    let client = MetadataClient::new(&config).map_err(|e| CliError::config(e.to_string()))?;

    let conn = super::open_catalog_for_ingest(db_path, dry_run)?;
    let mut store = CatalogStore::new(&conn);
    store
        .initialize()
        .map_err(|e| CliError::database(e.to_string()))?;

    let fetcher = ArtworkFetcher::new(output);
    let artwork: Option<(&ArtworkFetcher, &dyn ArtworkSource)> = if no_artwork {
        None
    } else {
        Some((&fetcher, &client))
    };

    let options = IngestOptions {
        dry_run,
        download_artwork: !no_artwork,
        fail_fast,
        limit,
    };

    log::info!(
        "{}",
        format!(
            "{} {} via {}",
            if dry_run { "Checking" } else { "Cataloging" },
            movie_dir.display(),
            client.base_url(),
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );
    if !no_artwork && !dry_run {
        log::debug!("Artwork goes to {}", fetcher.output_dir().display());
    }

    let progress = CliIngestProgress::new(quiet, dry_run);
    let result =
        cinecorn_import::ingest_directory(&store, &client, artwork, movie_dir, &options, &progress);
    match result {
        Ok(_) => Ok(()),
        Err(e) => {
            progress.bar.finish_and_clear();
            match e {
                IngestError::Db(e) => Err(CliError::database(e.to_string())),
                other => Err(CliError::ingest(other.to_string())),
            }
        }
    }
}
