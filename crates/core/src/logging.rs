//! Process-wide file logging.
//!
//! All log output goes to one append-only file under a local folder, one
//! line per record with timestamp, level, and message. Level selection
//! follows `RUST_LOG`, defaulting to `info`. There is no rotation.

use crate::error::Result;
use std::fs::{self, OpenOptions};
use std::path::Path;

/// Name of the log file inside the log folder.
pub const LOG_FILE: &str = "snapask.log";

/// Initializes the global logger, appending to `<dir>/snapask.log`.
///
/// Call once at startup before any other subsystem logs.
///
/// # Errors
///
/// Returns [`crate::AppError::Io`] when the folder or file cannot be
/// created.
pub fn init(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}
