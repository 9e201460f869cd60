// @zen-component: CHAT-CompletionAPI
//
//! Upstream chat-completion client.
//!
//! The relay talks to any OpenAI-compatible `/chat/completions` endpoint
//! through the [`CompletionProvider`] trait. [`openai::OpenAiCompatible`] is
//! the HTTP implementation used in production.

pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chat::ChatMessage;

/// Errors that can occur while calling the upstream completion API.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The upstream answered with a non-success status.
    #[error("Upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Upstream request timed out")]
    Timeout,

    #[error("Upstream request failed: {0}")]
    Transport(String),

    #[error("Upstream response parse error: {0}")]
    Decode(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for CompletionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CompletionError::Timeout
        } else if e.is_decode() {
            CompletionError::Decode(e.to_string())
        } else {
            CompletionError::Transport(e.to_string())
        }
    }
}

/// Body sent to the upstream `/chat/completions` endpoint.
#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub max_tokens: u32,
    pub temperature: f32,
}

/// The subset of the upstream response the relay reads.
#[derive(Debug, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Option<Vec<CompletionChoice>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
    /// Legacy completion-style text field.
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Text of the first choice: `message.content`, else `text`.
    pub fn first_text(self) -> Option<String> {
        let first = self.choices?.into_iter().next()?;
        first.message.and_then(|m| m.content).or(first.text)
    }
}

/// Something that turns a message sequence into reply text.
///
/// `Ok(None)` means the upstream succeeded but produced no usable text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        request: &CompletionRequest<'_>,
    ) -> Result<Option<String>, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CompletionResponse {
        serde_json::from_str(json).expect("parse")
    }

    #[test]
    fn prefers_message_content() {
        let r = parse(r#"{"choices":[{"message":{"content":"Hi there"},"text":"legacy"}]}"#);
        assert_eq!(r.first_text().as_deref(), Some("Hi there"));
    }

    #[test]
    fn falls_back_to_text_field() {
        let r = parse(r#"{"choices":[{"message":{"content":null},"text":"legacy"}]}"#);
        assert_eq!(r.first_text().as_deref(), Some("legacy"));

        let r = parse(r#"{"choices":[{"text":"only text"}]}"#);
        assert_eq!(r.first_text().as_deref(), Some("only text"));
    }

    #[test]
    fn empty_content_counts_as_present() {
        let r = parse(r#"{"choices":[{"message":{"content":""},"text":"legacy"}]}"#);
        assert_eq!(r.first_text().as_deref(), Some(""));
    }

    #[test]
    fn missing_fields_yield_none() {
        assert!(parse(r#"{}"#).first_text().is_none());
        assert!(parse(r#"{"choices":null}"#).first_text().is_none());
        assert!(parse(r#"{"choices":[]}"#).first_text().is_none());
        assert!(parse(r#"{"choices":[{"index":0}]}"#).first_text().is_none());
    }

    #[test]
    fn only_first_choice_is_read() {
        let r = parse(r#"{"choices":[{"index":0},{"message":{"content":"second"}}]}"#);
        assert!(r.first_text().is_none());
    }

    #[test]
    fn request_serializes_generation_parameters() {
        let messages = [ChatMessage::user("Hello")];
        let req = CompletionRequest {
            model: "gemma2-9b-it",
            messages: &messages,
            max_tokens: 512,
            temperature: 0.5,
        };
        let json = serde_json::to_value(&req).expect("serialize");
        assert_eq!(json["model"], "gemma2-9b-it");
        assert_eq!(json["max_tokens"], 512);
        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["messages"][0]["role"], "user");
    }
}
