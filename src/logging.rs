//! File logging
//!
//! The terminal belongs to the TUI, so log output goes to a file. Logging
//! is only switched on with `--debug` or when `RUST_LOG` is set.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::error::NotesError;

const LOG_DIR: &str = "smartnotes";
const LOG_FILE: &str = "smartnotes.log";

pub fn log_file_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(LOG_DIR)
        .join(LOG_FILE)
}

/// Initialize the logger if requested; returns where logs are written
pub fn init(debug: bool) -> Result<Option<PathBuf>, NotesError> {
    if !debug && std::env::var_os("RUST_LOG").is_none() {
        return Ok(None);
    }

    let path = log_file_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file: File = OpenOptions::new().create(true).append(true).open(&path)?;

    let default_level = if debug { "debug" } else { "warn" };
    let result = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level),
    )
    .target(env_logger::Target::Pipe(Box::new(file)))
    .format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    })
    .try_init();

    if let Err(e) = result {
        // Already initialized (tests, embedding); keep the existing logger
        log::debug!("Logger already initialized: {}", e);
    }

    Ok(Some(path))
}
