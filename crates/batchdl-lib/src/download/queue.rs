use super::types::Job;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// Bounded job channel. The sending half feeds, the receiving half is shared by every worker.
pub(crate) fn job_channel(capacity: usize) -> (mpsc::Sender<Job>, JobReceiver) {
    let (tx, rx) = mpsc::channel(capacity);
    (
        tx,
        JobReceiver {
            inner: Arc::new(Mutex::new(rx)),
        },
    )
}

/// Multi-consumer handle over the job channel; whichever worker is idle takes the next job.
#[derive(Clone)]
pub(crate) struct JobReceiver {
    inner: Arc<Mutex<mpsc::Receiver<Job>>>,
}

impl JobReceiver {
    /// Next job, or `None` once the queue is closed and drained.
    pub(crate) async fn next(&self) -> Option<Job> {
        self.inner.lock().await.recv().await
    }
}

/// Pushes every job in order, waiting whenever the queue is full, then closes it.
pub(crate) async fn feed(jobs: Vec<Job>, tx: mpsc::Sender<Job>) {
    let total = jobs.len();
    for job in jobs {
        if tx.send(job).await.is_err() {
            tracing::error!("Job queue closed before all jobs were enqueued");
            return;
        }
    }
    tracing::debug!(jobs = total, "All jobs enqueued, closing job queue");
    drop(tx);
}
