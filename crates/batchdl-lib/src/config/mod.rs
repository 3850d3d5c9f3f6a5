mod loader;
mod model;

pub use loader::load_config;
pub use model::{Config, DownloadEntry};

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

pub const DEFAULT_THREADS: usize = 3;

pub fn validate_threads(threads: usize) -> Result<usize, ConfigError> {
    if threads == 0 {
        return Err(ConfigError::InvalidThreadCount { threads });
    }
    Ok(threads)
}

/// Checks once, up front, that downloads can be written into `path`.
pub fn validate_dest_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let metadata = std::fs::metadata(path).map_err(|source| ConfigError::DestDirUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        return Err(ConfigError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    if metadata.permissions().readonly() {
        return Err(ConfigError::ReadOnly {
            path: path.to_path_buf(),
        });
    }

    Ok(path.to_path_buf())
}
