//! File-backed tracing; the terminal belongs to the picker UI.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Install the global subscriber writing to the configured log file.
///
/// `RUST_LOG` wins over `[log] level`. Returns the log path, or `None` when
/// the file cannot be opened, in which case logging stays off.
pub fn init(config: &AppConfig) -> Option<PathBuf> {
    let path = config.log_file()?;
    let file = open_log(&path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .ok()?;
    Some(path)
}

fn open_log(path: &std::path::Path) -> Option<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
