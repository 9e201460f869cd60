//! Liveness endpoint.

/// Body returned by `GET /`.
pub const LIVENESS_MESSAGE: &str = "Chatbot backend is running 🚀";

/// `GET /`: plain-text liveness string.
pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}
