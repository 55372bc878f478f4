//! File logging. The terminal is busy drawing, so log lines go to a file
//! in the cache directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use directories::ProjectDirs;
use env_logger::{Env, Target};

const LOG_FILE: &str = "plexus.log";

/// Install the global logger. Filter comes from `RUST_LOG`, default `warn`.
///
/// Returns the log file path, or `None` when the platform has no cache
/// directory and logging stays disabled.
pub fn init() -> color_eyre::Result<Option<PathBuf>> {
    let Some(dirs) = ProjectDirs::from("", "", "plexus") else {
        return Ok(None);
    };
    let dir = dirs.cache_dir();
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(Some(path))
}
