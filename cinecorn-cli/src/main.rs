//! cinecorn CLI
//!
//! Command-line interface for cataloging a directory of movie files.

mod cli_types;
mod commands;
mod error;

use std::io::Write;

use clap::Parser;
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let result = match cli.command {
        Commands::Init => commands::init::run_init(&cli.db),
        Commands::Ingest {
            movie_dir,
            output,
            dry_run,
            no_artwork,
            fail_fast,
            limit,
            provider,
        } => commands::ingest::run_ingest(
            &cli.db,
            &movie_dir,
            &output,
            dry_run,
            no_artwork,
            fail_fast,
            limit,
            provider,
            cli.quiet,
        ),
        Commands::Lookup {
            term,
            json,
            provider,
        } => commands::lookup::run_lookup(&term, json, provider),
        Commands::Show { filename, json } => commands::show::run_show(&cli.db, &filename, json),
        Commands::List { letter } => commands::list::run_list(&cli.db, letter),
        Commands::Stats => commands::stats::run_stats(&cli.db),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::Set {
                provider,
                timeout_secs,
            } => commands::config::run_config_set(provider, timeout_secs),
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Install the logger that carries all user-facing output.
///
/// Info lines are printed bare; warnings and errors get a colored prefix.
/// `--verbose` switches to env_logger's timestamped format at debug level.
/// `RUST_LOG` overrides the level chosen here.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module("cinecorn", level)
        .target(env_logger::Target::Stdout);

    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| match record.level() {
            Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stdout, |t| t.red()),
                record.args()
            ),
            Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stdout, |t| t.yellow()),
                record.args()
            ),
            _ => writeln!(buf, "{}", record.args()),
        });
    }

    builder.parse_default_env();
    builder.init();
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
