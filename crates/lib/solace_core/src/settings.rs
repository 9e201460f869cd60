//! Relay persona and generation settings.

/// Persona given to the model ahead of every conversation.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a compassionate AI mental health assistant for university and \
higher-education students. Answer empathetically, never provide medical diagnosis, encourage \
seeking professional help when needed, and be concise and supportive. Avoid giving medication \
or clinical instructions.";

/// Default upstream model identifier.
pub const DEFAULT_MODEL: &str = "gemma2-9b-it";

/// Default upper bound on generated tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 512;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Number of trailing history turns forwarded upstream.
pub const DEFAULT_HISTORY_WINDOW: usize = 6;

/// Reply used when the upstream returns a choice without any text.
pub const DEFAULT_FALLBACK_REPLY: &str = "Sorry, I could not generate a response at this time.";

/// Everything the relay needs to turn a user message into an upstream request.
#[derive(Clone, Debug, PartialEq)]
pub struct RelaySettings {
    /// System-role instruction prepended to every conversation.
    pub system_prompt: String,
    /// Upstream model identifier.
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Maximum number of caller-supplied history turns kept.
    pub history_window: usize,
    /// Substituted when the first choice carries no text.
    pub fallback_reply: String,
}

impl RelaySettings {
    /// Replaces the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            history_window: DEFAULT_HISTORY_WINDOW,
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
        }
    }
}
