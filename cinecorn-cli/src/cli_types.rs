//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cinecorn")]
#[command(about = "Catalog a directory of movie files", long_about = None)]
pub(crate) struct Cli {
    /// Catalog database file
    #[arg(long, global = true, default_value = "cinecorn.db")]
    pub db: PathBuf,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Metadata provider connection overrides.
#[derive(Args, Clone)]
pub(crate) struct ProviderArgs {
    /// Base URL of the metadata provider (overrides env and config file)
    #[arg(long)]
    pub provider_url: Option<String>,

    /// API key for the metadata provider
    #[arg(long)]
    pub api_key: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create the catalog database, or verify an existing one
    Init,

    /// Look up every movie file in a directory and add it to the catalog
    Ingest {
        /// Directory containing the movie files
        movie_dir: PathBuf,

        /// Directory that receives thumbs/ and images/ (default: current directory)
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Show what would be cataloged without writing anything
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Skip artwork downloads
        #[arg(long)]
        no_artwork: bool,

        /// Stop at the first file that fails
        #[arg(long)]
        fail_fast: bool,

        /// Maximum number of files to process
        #[arg(short, long)]
        limit: Option<usize>,

        #[command(flatten)]
        provider: ProviderArgs,
    },

    /// Look up a movie by search term without cataloging it
    Lookup {
        /// Search term, e.g. a filename without its extension
        term: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        provider: ProviderArgs,
    },

    /// Show a cataloged movie with its cast, directors, and genres
    Show {
        /// Filename the movie was cataloged from
        filename: String,

        /// Print the movie as JSON
        #[arg(long)]
        json: bool,
    },

    /// List cataloged movies by index letter
    List {
        /// Only list movies filed under this letter
        #[arg(short, long)]
        letter: Option<String>,
    },

    /// Show catalog statistics
    Stats,

    /// Inspect the metadata provider configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and where each one comes from
    Show,
    /// Print the config file path
    Path,
    /// Write provider settings to the config file
    Set {
        #[command(flatten)]
        provider: ProviderArgs,

        /// Request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}
