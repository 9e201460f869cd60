//! Widget error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Relay request failed: {0}")]
    Transport(String),

    #[error("Relay response parse error: {0}")]
    Decode(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Speech recognition unavailable: {0}")]
    Speech(String),

    /// The widget's event loop has stopped.
    #[error("Input widget is closed")]
    Closed,
}
