use super::collector::collect;
use super::queue::{feed, job_channel};
use super::registry::JobRegistry;
use super::types::{DownloadResult, Job, JobError, RunReport};
use super::worker::WorkerPool;
use crate::config::{DEFAULT_THREADS, validate_dest_dir, validate_threads};
use crate::error::{BatchDlError, ConfigError, RegistryError};
use crate::fetch::{FetchError, Fetcher, HttpFetcher, HttpFetcherOptions};
use crate::sink::{Diagnostic, DiagnosticsSink, WriterSink};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

/// Downloads a batch of registered jobs with at most `threads` transfers in flight.
///
/// Configure and [`register`](Self::register) jobs first, then [`run`](Self::run).
/// `register` needs `&mut self` and `run` only `&self`, so the registry cannot change
/// while a run is in progress.
pub struct Downloader {
    threads: usize,
    dest_dir: PathBuf,
    registry: JobRegistry,
    fetcher: Arc<dyn Fetcher>,
    sink: Arc<dyn DiagnosticsSink>,
}

impl Downloader {
    /// Three threads, current directory, reqwest fetcher, diagnostics on stderr.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_http_options(HttpFetcherOptions::default())
    }

    pub fn with_http_options(options: HttpFetcherOptions) -> Result<Self, FetchError> {
        Ok(Self {
            threads: DEFAULT_THREADS,
            dest_dir: PathBuf::from("."),
            registry: JobRegistry::new(),
            fetcher: Arc::new(HttpFetcher::new(options)?),
            sink: Arc::new(WriterSink::stderr()),
        })
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn configure(
        &mut self,
        threads: usize,
        dest_dir: impl AsRef<Path>,
    ) -> Result<(), ConfigError> {
        let threads = validate_threads(threads)?;
        let dest_dir = validate_dest_dir(dest_dir.as_ref())?;
        self.threads = threads;
        self.dest_dir = dest_dir;
        Ok(())
    }

    /// Takes values that already went through [`validate_threads`] and [`validate_dest_dir`].
    pub(crate) fn use_validated_config(&mut self, threads: usize, dest_dir: PathBuf) {
        self.threads = threads;
        self.dest_dir = dest_dir;
    }

    pub fn set_threads(&mut self, threads: usize) -> Result<(), ConfigError> {
        self.threads = validate_threads(threads)?;
        Ok(())
    }

    pub fn set_dest_dir(&mut self, dest_dir: impl AsRef<Path>) -> Result<(), ConfigError> {
        self.dest_dir = validate_dest_dir(dest_dir.as_ref())?;
        Ok(())
    }

    pub fn register(
        &mut self,
        url: impl Into<String>,
        filename: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.registry.register(url, filename)
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }

    pub fn jobs(&self) -> &[Job] {
        self.registry.jobs()
    }

    /// Processes every registered job and resolves once all results have been reported.
    ///
    /// Per-job failures are reported to the sink and kept in the returned report; they
    /// never abort the run. There is no per-job deadline here: a transfer that never
    /// finishes holds its worker forever unless the fetcher enforces a timeout.
    ///
    /// The feeder, workers and collector belong to the returned future. Dropping it before it
    /// resolves aborts them, and a file that was mid-transfer is left as it was.
    pub async fn run(&self) -> Result<RunReport, BatchDlError> {
        let jobs = self.registry.jobs().to_vec();
        tracing::info!(
            jobs = jobs.len(),
            threads = self.threads,
            dest_dir = %self.dest_dir.display(),
            "Run state: running"
        );

        let (job_tx, job_rx) = job_channel(self.threads);
        let (result_tx, result_rx) = mpsc::channel(self.threads);
        let (done_tx, done_rx) = oneshot::channel();

        let pool = WorkerPool::new(self.threads, self.fetcher.clone(), &self.dest_dir);
        let mut tasks = JoinSet::new();
        tasks.spawn(feed(jobs, job_tx));
        tasks.spawn(collect(result_rx, self.sink.clone(), done_tx));
        tasks.spawn(pool.run(job_rx, result_tx));

        let mut report = done_rx
            .await
            .map_err(|_| eyre::eyre!("Result collector stopped before the run completed"))?;
        while let Some(joined) = tasks.join_next().await {
            if let Err(err) = joined {
                tracing::error!("Run task failed: {}", err);
            }
        }
        self.report_missing_results(&mut report);

        tracing::info!(
            succeeded = report.succeeded().count(),
            failed = report.failed().count(),
            "Run state: complete"
        );
        Ok(report)
    }

    /// A worker that dies mid-job never sends its result. Those jobs are reported as aborted
    /// so the report still holds one result per registered job.
    fn report_missing_results(&self, report: &mut RunReport) {
        let expected = self.registry.len();
        if report.len() == expected {
            return;
        }
        tracing::error!(
            expected,
            reported = report.len(),
            "Workers stopped without reporting every job"
        );

        let reported: HashSet<String> = report
            .results
            .iter()
            .map(|result| result.job.filename.clone())
            .collect();
        for job in self.registry.jobs() {
            if reported.contains(&job.filename) {
                continue;
            }
            self.sink.report(&Diagnostic::Failed {
                url: job.url.clone(),
                message: JobError::Aborted.to_string(),
            });
            report
                .results
                .push(DownloadResult::failure(job.clone(), JobError::Aborted));
        }
    }
}
