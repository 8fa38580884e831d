use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;

use crate::error::FetchError;

/// Cooperative cancellation flag shared between a loader and its worker.
#[derive(Debug, Clone, Default)]
pub struct AbortSignal(Arc<AtomicBool>);

impl AbortSignal {
    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn check(&self) -> Result<(), FetchError> {
        if self.is_aborted() {
            Err(FetchError::Aborted)
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Default)]
pub struct AbortController {
    signal: AbortSignal,
}

impl AbortController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(&self) -> AbortSignal {
        self.signal.clone()
    }

    pub fn abort(&self) {
        self.signal.0.store(true, Ordering::Release);
    }
}

pub trait StatsTransport: Send + Sync {
    /// GETs `path` (relative to the API base) and parses the body as JSON.
    fn get_json(&self, path: &str, signal: &AbortSignal) -> Result<Value, FetchError>;
}

impl<F> StatsTransport for F
where
    F: Fn(&str) -> Result<Value, FetchError> + Send + Sync,
{
    fn get_json(&self, path: &str, signal: &AbortSignal) -> Result<Value, FetchError> {
        signal.check()?;
        let value = self(path)?;
        signal.check()?;
        Ok(value)
    }
}

pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl StatsTransport for HttpTransport {
    // The blocking client cannot be interrupted mid-request, so the signal is
    // checked at each boundary instead.
    fn get_json(&self, path: &str, signal: &AbortSignal) -> Result<Value, FetchError> {
        signal.check()?;
        let url = self.url_for(path);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        signal.check()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        let body = response
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        signal.check()?;

        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}
