//! Structured logging setup

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

/// Log file written while the terminal UI owns the screen
pub const LOG_FILE_NAME: &str = "shoresquad.log";

/// Initialize logging to stderr, for the one-shot commands.
///
/// Must be called at most once (in main.rs).
pub fn init_stderr() {
    fmt()
        .with_env_filter(env_filter("info"))
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

/// Initialize logging to `<dir>/shoresquad.log`, for the terminal UI.
///
/// Must be called at most once (in main.rs).
pub fn init_file(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))?;

    fmt()
        .with_env_filter(env_filter("warn"))
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
