//! Request and response bodies for the HTTP surface.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    /// Prior turns, oldest first. Kept raw; anything that is not an array of
    /// `{role, content}` objects is treated as absent.
    #[serde(default)]
    pub history: Option<serde_json::Value>,
}

/// Successful `POST /api/chat` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Error body for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
