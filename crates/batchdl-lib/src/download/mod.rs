mod collector;
mod downloader;
mod format;
mod queue;
mod registry;
mod types;
mod worker;

#[cfg(test)]
mod test_support;

pub use downloader::Downloader;
pub use format::format_bytes;
pub use registry::JobRegistry;
pub use types::{DownloadResult, Job, JobError, RunReport};
