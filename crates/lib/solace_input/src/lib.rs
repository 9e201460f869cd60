//! # solace_input
//!
//! Headless chat input widget. Collects typed or spoken drafts, submits them
//! to the Solace relay and hands both sides of the exchange to host-supplied
//! callbacks.
//!
//! The widget is a single task ([`ChatInput::run`]) consuming host
//! [`InputEvent`]s together with its own transcript and timer signals in
//! order, so user input, relay completions and timer firings never race.

pub mod config;
pub mod error;
pub mod relay;
pub mod sink;
pub mod speech;
mod timer;
pub mod widget;

pub use config::InputConfig;
pub use error::InputError;
pub use relay::{ChatRelay, HttpRelay};
pub use sink::MessageSink;
pub use speech::{RecognitionSession, SpeechRecognizer, TranscriptSender};
pub use widget::{ChatInput, InputEvent, InputHandle, Key};

/// Recorded as the assistant's turn when the relay cannot be reached or
/// answers with something unreadable.
pub const APOLOGY_REPLY: &str = "Sorry, I'm having trouble responding right now.";

/// Recorded when the relay answers without a usable `reply`.
pub const NO_RESPONSE_REPLY: &str = "Sorry, I couldn't get a response.";
