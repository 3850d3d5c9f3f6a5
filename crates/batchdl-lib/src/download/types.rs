use std::path::PathBuf;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    pub url: String,
    pub filename: String,
}

/// Why a single job failed. Carried in its [`DownloadResult`], never propagated.
#[derive(Error, Debug)]
pub enum JobError {
    #[error("{reason}")]
    Transport { reason: String },

    #[error("unexpected HTTP status {code}")]
    HttpStatus { code: u16 },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("worker stopped before reporting a result")]
    Aborted,
}

#[derive(Debug)]
pub struct DownloadResult {
    pub job: Job,
    pub bytes_written: u64,
    pub error: Option<JobError>,
}

impl DownloadResult {
    pub fn success(job: Job, bytes_written: u64) -> Self {
        Self {
            job,
            bytes_written,
            error: None,
        }
    }

    pub fn failure(job: Job, error: JobError) -> Self {
        Self {
            job,
            bytes_written: 0,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Everything the collector saw during one run, in arrival order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub results: Vec<DownloadResult>,
}

impl RunReport {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &DownloadResult> {
        self.results.iter().filter(|r| r.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &DownloadResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    pub fn total_bytes(&self) -> u64 {
        self.results.iter().map(|r| r.bytes_written).sum()
    }

    pub fn is_success(&self) -> bool {
        self.results.iter().all(DownloadResult::is_success)
    }

    /// Looks up the result for a destination filename.
    pub fn get(&self, filename: &str) -> Option<&DownloadResult> {
        self.results.iter().find(|r| r.job.filename == filename)
    }
}
