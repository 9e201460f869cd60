//! API server configuration.

use std::time::Duration;

use solace_core::completion::CompletionError;
use solace_core::completion::openai::{
    GROQ_CHAT_COMPLETIONS_URL, OpenAiCompatible, PLACEHOLDER_API_KEY,
};
use solace_core::settings::{DEFAULT_MODEL, RelaySettings};
use thiserror::Error;

/// Default listener port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default bound on a single upstream call.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Invalid value in the environment.
#[derive(Debug, Error)]
#[error("Invalid value for {var}: {value:?}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:5000").
    pub bind_addr: String,
    /// Upstream `/chat/completions` URL.
    pub upstream_url: String,
    /// Bearer credential for the upstream. `None` sends the placeholder key.
    pub api_key: Option<String>,
    /// Upper bound on one upstream call.
    pub upstream_timeout: Duration,
    /// Persona and generation parameters.
    pub relay: RelaySettings,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: format!("0.0.0.0:{DEFAULT_PORT}"),
            upstream_url: GROQ_CHAT_COMPLETIONS_URL.to_string(),
            api_key: None,
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            relay: RelaySettings::default(),
        }
    }
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                | Default                                           |
    /// |-------------------------|---------------------------------------------------|
    /// | `PORT`                  | `5000`                                            |
    /// | `BIND_HOST`             | `0.0.0.0`                                         |
    /// | `GROQ_API_KEY`          | unset                                             |
    /// | `UPSTREAM_URL`          | `https://api.groq.com/openai/v1/chat/completions` |
    /// | `UPSTREAM_MODEL`        | `gemma2-9b-it`                                    |
    /// | `UPSTREAM_TIMEOUT_SECS` | `30`                                              |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ApiConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(v) => v.trim().parse::<u16>().map_err(|_| ConfigError {
                var: "PORT",
                value: v,
            })?,
            None => DEFAULT_PORT,
        };
        let host = var("BIND_HOST").unwrap_or_else(|| "0.0.0.0".into());

        let timeout_secs = match var("UPSTREAM_TIMEOUT_SECS") {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError {
                        var: "UPSTREAM_TIMEOUT_SECS",
                        value: v,
                    });
                }
            },
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        let relay =
            RelaySettings::default().with_model(var("UPSTREAM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()));

        Ok(Self {
            bind_addr: format!("{host}:{port}"),
            upstream_url: var("UPSTREAM_URL").unwrap_or_else(|| GROQ_CHAT_COMPLETIONS_URL.into()),
            api_key: var("GROQ_API_KEY"),
            upstream_timeout: Duration::from_secs(timeout_secs),
            relay,
        })
    }

    /// Builds the upstream client described by this config.
    pub fn completion_provider(&self) -> Result<OpenAiCompatible, CompletionError> {
        let key = self.api_key.as_deref().unwrap_or(PLACEHOLDER_API_KEY);
        OpenAiCompatible::new(&self.upstream_url, key, self.upstream_timeout)
    }
}
