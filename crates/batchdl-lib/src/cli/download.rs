use crate::cli::DownloadParams;
use crate::download::{Downloader, RunReport, format_bytes};
use crate::error::BatchDlError;
use crate::sink::DiagnosticsSink;
use std::sync::Arc;

pub async fn run_download(params: DownloadParams) -> Result<RunReport, BatchDlError> {
    let downloader = Downloader::with_http_options(params.http_options.clone())
        .map_err(|e| eyre::eyre!("Failed to build HTTP client: {}", e))?;
    run_download_with(params, downloader).await
}

/// Like [`run_download`], with diagnostics going to `sink` instead of stderr.
pub async fn run_download_to(
    params: DownloadParams,
    sink: Arc<dyn DiagnosticsSink>,
) -> Result<RunReport, BatchDlError> {
    let downloader = Downloader::with_http_options(params.http_options.clone())
        .map_err(|e| eyre::eyre!("Failed to build HTTP client: {}", e))?
        .with_sink(sink);
    run_download_with(params, downloader).await
}

async fn run_download_with(
    params: DownloadParams,
    mut downloader: Downloader,
) -> Result<RunReport, BatchDlError> {
    let DownloadParams {
        threads,
        dest_dir,
        http_options: _,
        jobs,
    } = params;

    downloader.use_validated_config(threads, dest_dir);

    tracing::info!("Registering {} downloads", jobs.len());
    for job in jobs {
        if let Err(err) = downloader.register(&job.url, &job.filename) {
            tracing::warn!(url = %job.url, "Skipping download: {}", err);
        }
    }

    let report = downloader.run().await?;

    let failed = report.failed().count();
    if failed == 0 {
        tracing::info!(
            "Downloaded {} files ({})",
            report.len(),
            format_bytes(report.total_bytes())
        );
    } else {
        tracing::warn!("{} of {} downloads failed", failed, report.len());
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::HttpFetcherOptions;
    use crate::sink::MemorySink;

    #[tokio::test]
    async fn test_resolved_params_are_not_validated_again() {
        let dir = tempfile::tempdir().unwrap();
        let dest_dir = dir.path().join("resolved");
        std::fs::create_dir(&dest_dir).unwrap();
        let params = DownloadParams {
            threads: 2,
            dest_dir: dest_dir.clone(),
            http_options: HttpFetcherOptions::default(),
            jobs: Vec::new(),
        };
        // Gone after resolution; a second check would turn this into a configuration error.
        std::fs::remove_dir(&dest_dir).unwrap();

        let sink = Arc::new(MemorySink::new());
        let report = run_download_to(params, sink.clone()).await.unwrap();

        assert!(report.is_empty());
        assert!(sink.lines().is_empty());
    }
}
