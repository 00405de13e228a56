//! Command-line interface parsing for ShoreSquad
//!
//! This module handles parsing of CLI arguments using clap and resolves them
//! into the settings the application starts with.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::data::DEFAULT_FORECAST_URL;

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// The forecast endpoint is not a usable http(s) URL
    #[error("Invalid endpoint: '{0}'. Expected an http:// or https:// URL")]
    InvalidEndpoint(String),

    /// No cache directory was given and none could be determined
    #[error("Could not determine a cache directory; pass --cache-dir")]
    NoCacheDir,

    /// Timeout must be at least one second
    #[error("Invalid timeout: must be at least 1 second")]
    InvalidTimeout,
}

/// ShoreSquad - beach cleanup forecast widget
#[derive(Parser, Debug)]
#[command(name = "shoresquad")]
#[command(about = "Multi-day weather forecast for beach cleanups")]
#[command(version)]
pub struct Cli {
    /// Forecast endpoint to fetch from
    #[arg(long, env = "SHORESQUAD_ENDPOINT", default_value = DEFAULT_FORECAST_URL)]
    pub endpoint: String,

    /// Directory for the forecast cache and saved events
    #[arg(long, env = "SHORESQUAD_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 10, value_name = "SECS")]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch the forecast once and print it
    ///
    /// Examples:
    ///   shoresquad print            # Plain text
    ///   shoresquad print --html     # Summary and list markup
    ///   shoresquad print --refresh  # Ignore the cached forecast
    Print {
        /// Print HTML markup instead of plain text
        #[arg(long)]
        html: bool,
        /// Invalidate the cache before fetching
        #[arg(long)]
        refresh: bool,
    },
    /// Save an event, or unsave it if already saved
    Save {
        /// Event identifier
        event_id: String,
    },
    /// List saved events
    Saved,
}

/// Settings derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint: String,
    pub cache_dir: PathBuf,
    pub timeout: Duration,
    pub command: Option<Command>,
}

impl Settings {
    /// Creates Settings from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(Settings)` with the cache directory resolved
    /// * `Err(CliError)` if the endpoint or timeout is invalid, or no cache
    ///   directory can be found
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        Self::resolve(cli, default_cache_dir)
    }

    fn resolve(cli: &Cli, default_dir: impl FnOnce() -> Option<PathBuf>) -> Result<Self, CliError> {
        let endpoint = parse_endpoint(&cli.endpoint)?;

        if cli.timeout_secs == 0 {
            return Err(CliError::InvalidTimeout);
        }

        let cache_dir = match &cli.cache_dir {
            Some(dir) => dir.clone(),
            None => default_dir().ok_or(CliError::NoCacheDir)?,
        };

        Ok(Settings {
            endpoint,
            cache_dir,
            timeout: Duration::from_secs(cli.timeout_secs),
            command: cli.command.clone(),
        })
    }
}

/// Validates a forecast endpoint URL
pub fn parse_endpoint(s: &str) -> Result<String, CliError> {
    match reqwest::Url::parse(s) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(s.to_string()),
        _ => Err(CliError::InvalidEndpoint(s.to_string())),
    }
}

fn default_cache_dir() -> Option<PathBuf> {
    crate::cache::FileStore::new().map(|store| store.dir().to_path_buf())
}
