use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request aborted")]
    Aborted,
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status} for {path}")]
    Status { status: u16, path: String },
    #[error("invalid JSON in response for {path}: {message}")]
    Decode { path: String, message: String },
}

impl FetchError {
    /// Superseded requests surface as `Aborted` and are dropped, not reported.
    pub fn is_abort(&self) -> bool {
        matches!(self, FetchError::Aborted)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
