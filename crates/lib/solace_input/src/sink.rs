//! Host callbacks for rendering messages.

/// Receives both sides of every exchange for display.
///
/// Called from the widget task, one call at a time.
pub trait MessageSink: Send + Sync {
    fn record_user_message(&self, text: &str);
    fn record_assistant_message(&self, text: &str);
}
