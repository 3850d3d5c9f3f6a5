use crate::fetch::{FetchError, FetchResponse, Fetcher};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Clone, Debug)]
pub(crate) struct ScriptedResponse {
    outcome: Result<(u16, Vec<u8>), String>,
    body_error: Option<String>,
    delay: Duration,
    panics: bool,
}

impl ScriptedResponse {
    pub(crate) fn ok(body: Vec<u8>) -> Self {
        Self {
            outcome: Ok((200, body)),
            body_error: None,
            delay: Duration::ZERO,
            panics: false,
        }
    }

    pub(crate) fn status(code: u16) -> Self {
        Self {
            outcome: Ok((code, b"error page".to_vec())),
            body_error: None,
            delay: Duration::ZERO,
            panics: false,
        }
    }

    pub(crate) fn transport_error(reason: &str) -> Self {
        Self {
            outcome: Err(reason.to_string()),
            body_error: None,
            delay: Duration::ZERO,
            panics: false,
        }
    }

    /// The fetch call panics, taking its worker task down with it.
    pub(crate) fn panicking() -> Self {
        Self {
            panics: true,
            ..Self::ok(Vec::new())
        }
    }

    /// The body yields its bytes, then fails.
    pub(crate) fn failing_body(mut self, reason: &str) -> Self {
        self.body_error = Some(reason.to_string());
        self
    }

    pub(crate) fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// In-memory fetcher that also records the peak number of concurrent fetches.
#[derive(Default)]
pub(crate) struct ScriptedFetcher {
    responses: HashMap<String, ScriptedResponse>,
    fallback: Option<ScriptedResponse>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, url: &str, response: ScriptedResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    pub(crate) fn with_fallback(mut self, response: ScriptedResponse) -> Self {
        self.fallback = Some(response);
        self
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlightGuard(self.in_flight.clone());

        let response = self
            .responses
            .get(url)
            .or(self.fallback.as_ref())
            .cloned()
            .unwrap_or_else(|| ScriptedResponse::status(404));

        if response.panics {
            panic!("scripted fetch of {url} panicked");
        }
        if !response.delay.is_zero() {
            tokio::time::sleep(response.delay).await;
        }

        let (status, body) = response
            .outcome
            .map_err(|reason| FetchError::Transport { reason })?;

        let mut chunks: Vec<Result<Bytes, FetchError>> = body
            .chunks(4)
            .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
            .collect();
        if let Some(reason) = response.body_error {
            chunks.push(Err(FetchError::Transport { reason }));
        }

        Ok(FetchResponse {
            status,
            body: stream::iter(chunks).boxed(),
        })
    }
}
