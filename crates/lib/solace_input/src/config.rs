//! Widget configuration.

use std::time::Duration;

use url::Url;

use crate::InputError;

/// Relay used when `BACKEND_URL` is not set.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Idle time after the last transcript before the draft is sent.
pub const DEFAULT_SILENCE_THRESHOLD: Duration = Duration::from_millis(5000);

/// Bound on one relay call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, Debug)]
pub struct InputConfig {
    /// Base URL of the relay; `/api/chat` is appended.
    pub backend_base_url: Url,
    pub silence_threshold: Duration,
    pub request_timeout: Duration,
}

impl InputConfig {
    /// Config pointing at `base_url` with default timings.
    pub fn new(base_url: &str) -> Result<Self, InputError> {
        let backend_base_url = base_url
            .parse()
            .map_err(|e| InputError::Config(format!("Invalid backend URL {base_url}: {e}")))?;
        Ok(Self {
            backend_base_url,
            silence_threshold: DEFAULT_SILENCE_THRESHOLD,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Reads `BACKEND_URL`, falling back to [`DEFAULT_BACKEND_URL`].
    pub fn from_env() -> Result<Self, InputError> {
        let base = std::env::var("BACKEND_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        Self::new(&base)
    }

    /// Full URL of the relay endpoint.
    pub fn chat_url(&self) -> Result<Url, InputError> {
        let base = self.backend_base_url.as_str().trim_end_matches('/');
        format!("{base}/api/chat")
            .parse()
            .map_err(|e| InputError::Config(format!("Invalid chat URL: {e}")))
    }

    pub fn with_silence_threshold(mut self, threshold: Duration) -> Self {
        self.silence_threshold = threshold;
        self
    }
}
