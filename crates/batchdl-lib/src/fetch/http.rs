use super::{FetchError, FetchResponse, Fetcher};
use async_trait::async_trait;
use futures::stream::{StreamExt, TryStreamExt};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct HttpFetcherOptions {
    /// Per-request deadline. `None` lets a hung request block its worker indefinitely.
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for HttpFetcherOptions {
    fn default() -> Self {
        Self {
            request_timeout: None,
            user_agent: format!("batchdl/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// [`Fetcher`] backed by a shared reqwest client.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(options: HttpFetcherOptions) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(options.user_agent);
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        tracing::trace!(url, status, "Received response");

        Ok(FetchResponse {
            status,
            body: response.bytes_stream().map_err(FetchError::from).boxed(),
        })
    }
}
