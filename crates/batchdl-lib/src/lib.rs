pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fetch;
pub mod sink;
pub mod utils;

pub use crate::config::Config;
pub use download::{DownloadResult, Downloader, Job, JobError, RunReport};
pub use error::BatchDlError;
