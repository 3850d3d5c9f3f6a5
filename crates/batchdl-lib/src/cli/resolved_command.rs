use crate::cli::args::Command;
use crate::cli::params::DownloadParams;
use crate::config::{Config, DEFAULT_THREADS, load_config, validate_dest_dir, validate_threads};
use crate::download::Job;
use crate::error::BatchDlError;
use crate::fetch::HttpFetcherOptions;
use crate::utils::filename_from_url;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub enum ResolvedCommand {
    Download(DownloadParams),
}

pub fn resolve_command(command: Command) -> Result<ResolvedCommand, BatchDlError> {
    match command {
        Command::Download {
            config_path,
            threads,
            dest_dir,
            request_timeout_secs,
            urls,
        } => {
            let app_config = match config_path {
                Some(config_path) => {
                    tracing::info!("Loading configuration from {}", config_path);
                    load_config(&config_path)?
                }
                None => Config::default(),
            };

            let threads = validate_threads(
                threads
                    .or(app_config.threads)
                    .unwrap_or(DEFAULT_THREADS),
            )?;

            let dest_dir = dest_dir
                .map(PathBuf::from)
                .or(app_config.dest_dir)
                .unwrap_or_else(|| PathBuf::from("."));
            let dest_dir = validate_dest_dir(&dest_dir)?;

            let request_timeout = request_timeout_secs
                .or(app_config.request_timeout_secs)
                .map(Duration::from_secs);

            let mut jobs = Vec::with_capacity(app_config.downloads.len() + urls.len());
            for entry in app_config.downloads {
                let filename = match entry.filename {
                    Some(filename) => filename,
                    None => derive_filename(&entry.url)?,
                };
                jobs.push(Job {
                    url: entry.url,
                    filename,
                });
            }
            for url in urls {
                let filename = derive_filename(&url)?;
                jobs.push(Job { url, filename });
            }

            Ok(ResolvedCommand::Download(DownloadParams {
                threads,
                dest_dir,
                http_options: HttpFetcherOptions {
                    request_timeout,
                    ..Default::default()
                },
                jobs,
            }))
        }
    }
}

fn derive_filename(url: &str) -> Result<String, BatchDlError> {
    let parsed = Url::parse(url).map_err(|e| BatchDlError::CliArgumentValidation {
        details: format!("Invalid URL {url}: {e}"),
    })?;
    filename_from_url(&parsed).ok_or_else(|| BatchDlError::CliArgumentValidation {
        details: format!(
            "Cannot derive a filename from {url}. Give it an explicit filename in the config file."
        ),
    })
}
