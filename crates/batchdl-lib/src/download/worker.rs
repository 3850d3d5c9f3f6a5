use super::queue::JobReceiver;
use super::types::{DownloadResult, Job, JobError};
use crate::fetch::{BodyStream, FetchError, Fetcher};
use futures::stream::StreamExt;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

impl From<FetchError> for JobError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transport { reason } => JobError::Transport { reason },
        }
    }
}

/// Fixed set of workers pulling from one job queue and pushing into one result queue.
pub(crate) struct WorkerPool {
    threads: usize,
    fetcher: Arc<dyn Fetcher>,
    dest_dir: Arc<Path>,
}

impl WorkerPool {
    pub(crate) fn new(threads: usize, fetcher: Arc<dyn Fetcher>, dest_dir: &Path) -> Self {
        Self {
            threads,
            fetcher,
            dest_dir: Arc::from(dest_dir),
        }
    }

    /// Runs until the job queue is closed and drained. The result queue is closed only after
    /// every worker has been joined. Dropping this future aborts the workers.
    pub(crate) async fn run(self, jobs: JobReceiver, results: mpsc::Sender<DownloadResult>) {
        let mut workers = JoinSet::new();
        for worker in 0..self.threads {
            let jobs = jobs.clone();
            let results = results.clone();
            let fetcher = self.fetcher.clone();
            let dest_dir = self.dest_dir.clone();
            workers.spawn(async move { work(worker, jobs, results, fetcher, dest_dir).await });
        }
        drop(jobs);

        while let Some(joined) = workers.join_next().await {
            if let Err(err) = joined {
                tracing::error!("Worker task failed: {}", err);
            }
        }

        tracing::debug!(workers = self.threads, "All workers finished, closing result queue");
        drop(results);
    }
}

async fn work(
    worker: usize,
    jobs: JobReceiver,
    results: mpsc::Sender<DownloadResult>,
    fetcher: Arc<dyn Fetcher>,
    dest_dir: Arc<Path>,
) {
    let mut processed = 0usize;
    while let Some(job) = jobs.next().await {
        tracing::debug!(worker, url = %job.url, filename = %job.filename, "Downloading");
        let result = download_job(fetcher.as_ref(), &dest_dir, job).await;
        processed += 1;
        if results.send(result).await.is_err() {
            tracing::error!(worker, "Result queue closed while workers were still running");
            return;
        }
    }
    tracing::trace!(worker, processed, "Job queue drained, worker exiting");
}

/// Fetches one job and writes its body to `dest_dir/filename`. Always yields a result.
pub(crate) async fn download_job(
    fetcher: &dyn Fetcher,
    dest_dir: &Path,
    job: Job,
) -> DownloadResult {
    match fetch_to_file(fetcher, dest_dir, &job).await {
        Ok(bytes_written) => DownloadResult::success(job, bytes_written),
        Err(err) => DownloadResult::failure(job, err),
    }
}

async fn fetch_to_file(
    fetcher: &dyn Fetcher,
    dest_dir: &Path,
    job: &Job,
) -> Result<u64, JobError> {
    let response = fetcher.fetch(&job.url).await?;
    if response.status != 200 {
        return Err(JobError::HttpStatus {
            code: response.status,
        });
    }

    let output_path = dest_dir.join(&job.filename);
    let file = tokio::fs::File::create(&output_path)
        .await
        .map_err(|source| JobError::Io {
            path: output_path.clone(),
            source,
        })?;

    match stream_to_file(file, response.body, &output_path).await {
        Ok(bytes_written) => Ok(bytes_written),
        Err(err) => {
            // Only complete files are left behind.
            if let Err(remove_err) = tokio::fs::remove_file(&output_path).await {
                tracing::debug!(
                    output = %output_path.display(),
                    "Failed to remove partial file: {}",
                    remove_err
                );
            }
            Err(err)
        }
    }
}

async fn stream_to_file(
    file: tokio::fs::File,
    mut body: BodyStream,
    output_path: &Path,
) -> Result<u64, JobError> {
    let io_error = |source| JobError::Io {
        path: output_path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(file);
    let mut bytes_written: u64 = 0;
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        writer.write_all(&chunk).await.map_err(io_error)?;
        bytes_written += chunk.len() as u64;
    }
    writer.flush().await.map_err(io_error)?;

    Ok(bytes_written)
}
