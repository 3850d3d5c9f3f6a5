use super::format::format_bytes;
use super::types::{DownloadResult, RunReport};
use crate::sink::{Diagnostic, DiagnosticsSink};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// Drains the result queue, reporting each outcome, and fires `done` once the queue is closed.
pub(crate) async fn collect(
    mut results: mpsc::Receiver<DownloadResult>,
    sink: Arc<dyn DiagnosticsSink>,
    done: oneshot::Sender<RunReport>,
) {
    let mut report = RunReport::default();

    while let Some(result) = results.recv().await {
        let diagnostic = match &result.error {
            Some(err) => {
                tracing::warn!(
                    url = %result.job.url,
                    filename = %result.job.filename,
                    "Download failed: {:#}",
                    err
                );
                Diagnostic::Failed {
                    url: result.job.url.clone(),
                    message: err.to_string(),
                }
            }
            None => {
                tracing::info!(
                    url = %result.job.url,
                    filename = %result.job.filename,
                    bytes = result.bytes_written,
                    "Downloaded {}",
                    format_bytes(result.bytes_written)
                );
                Diagnostic::Downloaded {
                    url: result.job.url.clone(),
                    bytes: result.bytes_written,
                }
            }
        };
        sink.report(&diagnostic);
        report.results.push(result);
    }

    tracing::debug!(results = report.len(), "Result queue drained");
    if done.send(report).is_err() {
        tracing::error!("Nobody is waiting for the run to complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::types::{Job, JobError};
    use crate::sink::MemorySink;

    fn job(name: &str) -> Job {
        Job {
            url: format!("http://example.invalid/{name}"),
            filename: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_collect_reports_every_result_and_signals_completion() {
        let (tx, rx) = mpsc::channel(2);
        let (done_tx, done_rx) = oneshot::channel();
        let sink = Arc::new(MemorySink::new());
        let collector = tokio::spawn(collect(rx, sink.clone(), done_tx));

        tx.send(DownloadResult::success(job("a"), 1_500_000)).await.unwrap();
        tx.send(DownloadResult::failure(job("b"), JobError::HttpStatus { code: 404 }))
            .await
            .unwrap();
        tx.send(DownloadResult::success(job("c"), 12)).await.unwrap();
        drop(tx);

        let report = done_rx.await.unwrap();
        collector.await.unwrap();

        assert_eq!(report.len(), 3);
        assert_eq!(report.failed().count(), 1);
        assert_eq!(
            sink.lines(),
            vec![
                "Downloaded 1.5 MB from \"http://example.invalid/a\"",
                concat!(
                    "Error downloading from \"http://example.invalid/b\": ",
                    "\"unexpected HTTP status 404\""
                ),
                "Downloaded 12 B from \"http://example.invalid/c\"",
            ]
        );
    }

    #[tokio::test]
    async fn test_collect_waits_for_queue_closure() {
        let (tx, rx) = mpsc::channel(1);
        let (done_tx, mut done_rx) = oneshot::channel();
        let sink = Arc::new(MemorySink::new());
        tokio::spawn(collect(rx, sink, done_tx));

        tx.send(DownloadResult::success(job("a"), 1)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(done_rx.try_recv().is_err(), "completion must wait for closure");

        drop(tx);
        assert_eq!(done_rx.await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_collect_on_closed_empty_queue() {
        let (tx, rx) = mpsc::channel::<DownloadResult>(1);
        drop(tx);
        let (done_tx, done_rx) = oneshot::channel();
        let sink = Arc::new(MemorySink::new());

        collect(rx, sink.clone(), done_tx).await;

        assert!(done_rx.await.unwrap().is_empty());
        assert!(sink.lines().is_empty());
    }
}
