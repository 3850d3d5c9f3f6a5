use crate::download::Job;
use crate::fetch::HttpFetcherOptions;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DownloadParams {
    pub threads: usize,
    pub dest_dir: PathBuf,
    pub http_options: HttpFetcherOptions,
    /// In registration order; filenames are not yet checked for uniqueness.
    pub jobs: Vec<Job>,
}
