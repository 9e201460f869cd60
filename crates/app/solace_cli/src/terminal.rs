use solace_input::MessageSink;

/// Prints both sides of the conversation to stdout.
pub struct TerminalSink;

impl MessageSink for TerminalSink {
    fn record_user_message(&self, text: &str) {
        println!("you> {text}");
    }

    fn record_assistant_message(&self, text: &str) {
        println!("solace> {text}");
    }
}
