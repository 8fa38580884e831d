use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;
use crate::scope::identity::EntityId;

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsConfig {
    pub api_base: String,
    pub org_id: EntityId,
    pub session_path: PathBuf,
    pub request_timeout: Duration,
}

impl AnalyticsConfig {
    pub fn new(api_base: &str, org_id: EntityId) -> Result<Self, AppError> {
        let api_base = api_base.trim().trim_end_matches('/');
        if api_base.is_empty() {
            return Err(AppError::Config("--api-base must not be empty".to_string()));
        }
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "--api-base must be an http(s) URL, got '{api_base}'"
            )));
        }
        if org_id <= 0 {
            return Err(AppError::Config(format!(
                "--org must be a positive id, got {org_id}"
            )));
        }
        Ok(Self {
            api_base: api_base.to_string(),
            org_id,
            session_path: default_session_path(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_session_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.session_path = path;
        }
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout = Duration::from_secs(secs.max(1));
        self
    }
}

pub fn default_session_path() -> PathBuf {
    std::env::temp_dir()
        .join("interview-analytics")
        .join("session.json")
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
