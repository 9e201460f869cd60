// @zen-component: CHAT-RelayHandler
//
//! Chat relay handler.
//!
//! `POST /api/chat`:
//! 1. Validates that `message` is a non-empty string
//! 2. Keeps the trailing window of the caller's `history`
//! 3. Prepends the system persona and forwards upstream
//! 4. Returns `{reply}` or a mapped `{error}`

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use solace_core::chat::ChatMessage;
use solace_core::completion::CompletionError;
use solace_core::relay::relay_message;
use tracing::{debug, error, info};

use crate::AppState;
use crate::error::{AppError, AppResult, MESSAGE_REQUIRED};
use crate::models::{ChatRequest, ChatResponse};

/// `POST /api/chat`: relay one user message to the completion API.
#[tracing::instrument(name = "chat", skip_all, fields(request_id = %uuid::Uuid::now_v7()))]
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(request) = body.map_err(|e| {
        debug!(error = %e, "rejected chat request body");
        AppError::Validation(MESSAGE_REQUIRED.into())
    })?;

    let message = request
        .message
        .filter(|m| !m.is_empty())
        .ok_or_else(|| AppError::Validation(MESSAGE_REQUIRED.into()))?;

    let window = state.config.relay.history_window;
    let history = request
        .history
        .map(|h| parse_history(h, window))
        .unwrap_or_default();
    debug!(history = history.len(), "relaying chat message");

    match relay_message(state.provider.as_ref(), &state.config.relay, &message, &history).await {
        Ok(reply) => {
            info!(reply_len = reply.len(), "chat reply ready");
            Ok(Json(ChatResponse { reply }))
        }
        Err(e) => {
            match &e {
                CompletionError::Upstream { status, body } => {
                    error!(status, body = %body, "upstream API error");
                }
                other => error!(error = %other, "chat handler error"),
            }
            Err(e.into())
        }
    }
}

/// Interprets raw `history`: keeps the trailing `window` entries of an array
/// and drops any of them that is not a `{role, content}` pair of strings.
/// Anything other than an array is ignored.
fn parse_history(value: serde_json::Value, window: usize) -> Vec<ChatMessage> {
    let serde_json::Value::Array(mut entries) = value else {
        return Vec::new();
    };
    let recent = entries.split_off(entries.len().saturating_sub(window));
    recent
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(turn) => Some(turn),
            Err(e) => {
                debug!(error = %e, "dropping malformed history entry");
                None
            }
        })
        .collect()
}
