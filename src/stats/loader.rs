use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::stats::endpoints::Endpoint;
use crate::stats::transport::{AbortController, StatsTransport};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "camelCase")]
pub enum LoadState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

struct Completion {
    generation: u64,
    result: Result<Value, FetchError>,
}

/// One dashboard panel's data: at most one request in flight, and only the
/// latest request may commit.
///
/// Each request gets a new generation and its own abort controller. Starting
/// another request (or clearing, or dropping the loader) aborts the previous
/// one; anything that still arrives for an older generation is dropped.
pub struct StatsLoader<T> {
    name: &'static str,
    normalize: fn(&Endpoint, &Value) -> T,
    generation: u64,
    endpoint: Option<Endpoint>,
    controller: Option<AbortController>,
    state: LoadState<T>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl<T> StatsLoader<T> {
    pub fn new(name: &'static str, normalize: fn(&Endpoint, &Value) -> T) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            name,
            normalize,
            generation: 0,
            endpoint: None,
            controller: None,
            state: LoadState::Idle,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    /// Starts fetching `endpoint`. Requesting the endpoint that is already in
    /// flight or committed is a no-op and returns `false`.
    pub fn request(&mut self, transport: &Arc<dyn StatsTransport>, endpoint: Endpoint) -> bool {
        if self.endpoint == Some(endpoint) && !matches!(self.state, LoadState::Idle) {
            return false;
        }
        let path = endpoint.path();

        self.abort_current();
        self.generation += 1;
        let generation = self.generation;
        let controller = AbortController::new();
        let signal = controller.signal();
        let tx = self.tx.clone();
        let transport = Arc::clone(transport);

        debug!(panel = self.name, ?endpoint, generation, "fetch started");
        let spawned = thread::Builder::new()
            .name(format!("fetch-{}", self.name))
            .spawn(move || {
                let result = transport.get_json(&path, &signal);
                // The loader may be gone already; nobody is left to tell.
                let _ = tx.send(Completion { generation, result });
            });

        self.endpoint = Some(endpoint);
        match spawned {
            Ok(_) => {
                self.controller = Some(controller);
                self.state = LoadState::Loading;
            }
            Err(err) => {
                warn!(panel = self.name, error = %err, "could not start fetch worker");
                self.state = LoadState::Failed(err.to_string());
            }
        }
        true
    }

    /// Forgets the panel: aborts any request and returns to `Idle`.
    pub fn clear(&mut self) {
        self.abort_current();
        self.generation += 1;
        self.endpoint = None;
        self.state = LoadState::Idle;
    }

    /// Returns a failed panel to `Idle` so the next request fetches again.
    pub fn reset_failed(&mut self) -> bool {
        if !matches!(self.state, LoadState::Failed(_)) {
            return false;
        }
        self.clear();
        true
    }

    /// Marks the panel failed without a request (e.g. an id the path needs is
    /// unknown).
    pub fn fail(&mut self, message: impl Into<String>) {
        self.abort_current();
        self.generation += 1;
        self.endpoint = None;
        self.state = LoadState::Failed(message.into());
    }

    /// Applies every completion that has already arrived.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.rx.try_recv() {
            changed |= self.settle(completion);
        }
        changed
    }

    /// Blocks until the current request settles or `timeout` passes.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        self.poll();
        while self.state.is_loading() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(completion) => {
                    self.settle(completion);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        !self.state.is_loading()
    }

    fn settle(&mut self, completion: Completion) -> bool {
        if completion.generation != self.generation || !self.state.is_loading() {
            debug!(
                panel = self.name,
                generation = completion.generation,
                current = self.generation,
                "dropping superseded response"
            );
            return false;
        }
        match completion.result {
            Ok(payload) => match &self.endpoint {
                Some(endpoint) => {
                    self.state = LoadState::Ready((self.normalize)(endpoint, &payload));
                }
                None => return false,
            },
            Err(err) if err.is_abort() => {
                debug!(panel = self.name, "request aborted");
                return false;
            }
            Err(err) => {
                warn!(panel = self.name, error = %err, "statistics request failed");
                self.state = LoadState::Failed(err.to_string());
            }
        }
        self.controller = None;
        true
    }

    fn abort_current(&mut self) {
        if let Some(controller) = self.controller.take() {
            controller.abort();
        }
    }
}

impl<T> Drop for StatsLoader<T> {
    fn drop(&mut self) {
        self.abort_current();
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/loader.rs"]
mod tests;
