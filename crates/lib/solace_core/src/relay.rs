//! One relay round trip: assemble the conversation, call upstream, pick the reply.

use crate::chat::{ChatMessage, build_conversation};
use crate::completion::{CompletionError, CompletionProvider, CompletionRequest};
use crate::settings::RelaySettings;

/// Forwards `message` (with the trailing window of `history`) upstream and
/// returns the reply text, substituting the fallback reply when the upstream
/// produced none.
pub async fn relay_message(
    provider: &dyn CompletionProvider,
    settings: &RelaySettings,
    message: &str,
    history: &[ChatMessage],
) -> Result<String, CompletionError> {
    let messages = build_conversation(settings, history, message);
    let request = CompletionRequest {
        model: &settings.model,
        messages: &messages,
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
    };

    let reply = provider.complete(&request).await?;
    Ok(reply.unwrap_or_else(|| settings.fallback_reply.clone()))
}
