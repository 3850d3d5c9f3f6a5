use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchDlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Registration error: {0}")]
    Registry(#[from] RegistryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid command-line arguments: {details}")]
    CliArgumentValidation { details: String },

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Thread count must be at least 1, got {threads}")]
    InvalidThreadCount { threads: usize },

    #[error("{}: {source}", path.display())]
    DestDirUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("{}: directory is not writable", path.display())]
    ReadOnly { path: PathBuf },

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate filename: {filename}")]
    DuplicateFilename { filename: String },

    #[error("Invalid filename {filename:?}: must stay inside the destination directory")]
    InvalidFilename { filename: String },
}

impl BatchDlError {
    /// Whether this error was raised while validating configuration, before any download started.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            BatchDlError::Config(_) | BatchDlError::CliArgumentValidation { .. }
        )
    }
}
