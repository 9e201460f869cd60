// @zen-component: INPUT-ChatInput
//
//! The chat input widget.
//!
//! Voice capture has two states: idle and listening. `ToggleVoice` moves
//! between them. While listening every transcript replaces the draft and
//! re-arms the silence timer; when the timer fires the draft is submitted
//! and listening continues until toggled off.

use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, WeakUnboundedSender};

use crate::relay::ChatRelay;
use crate::sink::MessageSink;
use crate::speech::{RecognitionSession, SpeechRecognizer, TranscriptSender};
use crate::timer::SilenceTimer;
use crate::{APOLOGY_REPLY, InputConfig, InputError, NO_RESPONSE_REPLY};

/// Keys the text field reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Submits the draft.
    Enter,
    Char(char),
    Backspace,
}

/// Host input, processed strictly in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The text field's content changed.
    Edit(String),
    Key(Key),
    SendClicked,
    ToggleVoice,
    /// Tear the widget down.
    Shutdown,
}

/// What travels on the widget's channel: host input plus the signals only the
/// widget's own recognition sessions and silence timer may post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Signal {
    Host(InputEvent),
    /// Latest transcript from recognition session `session`.
    Transcript { session: u64, text: String },
    /// Silence countdown `generation` completed.
    SilenceElapsed { generation: u64 },
}

/// Cloneable handle the host uses to drive the widget.
#[derive(Debug, Clone)]
pub struct InputHandle {
    events: UnboundedSender<Signal>,
}

impl InputHandle {
    fn post(&self, event: InputEvent) -> Result<(), InputError> {
        self.events
            .send(Signal::Host(event))
            .map_err(|_| InputError::Closed)
    }

    /// Replaces the draft, as when the user edits the text field.
    pub fn edit(&self, text: impl Into<String>) -> Result<(), InputError> {
        self.post(InputEvent::Edit(text.into()))
    }

    pub fn key(&self, key: Key) -> Result<(), InputError> {
        self.post(InputEvent::Key(key))
    }

    pub fn send_clicked(&self) -> Result<(), InputError> {
        self.post(InputEvent::SendClicked)
    }

    pub fn toggle_voice(&self) -> Result<(), InputError> {
        self.post(InputEvent::ToggleVoice)
    }

    pub fn shutdown(&self) -> Result<(), InputError> {
        self.post(InputEvent::Shutdown)
    }
}

struct ActiveSession {
    id: u64,
    handle: Box<dyn RecognitionSession>,
}

/// Headless chat input: draft state, submission and voice capture.
pub struct ChatInput {
    relay: Arc<dyn ChatRelay>,
    sink: Arc<dyn MessageSink>,
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    draft: String,
    session: Option<ActiveSession>,
    next_session: u64,
    timer: SilenceTimer,
    /// Transcript the pending silence countdown will submit.
    heard: Option<String>,
    events: UnboundedReceiver<Signal>,
    self_events: WeakUnboundedSender<Signal>,
}

impl ChatInput {
    /// Creates a widget with no speech recognizer.
    pub fn new(
        config: &InputConfig,
        relay: Arc<dyn ChatRelay>,
        sink: Arc<dyn MessageSink>,
    ) -> (Self, InputHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let widget = Self {
            relay,
            sink,
            recognizer: None,
            draft: String::new(),
            session: None,
            next_session: 0,
            timer: SilenceTimer::new(config.silence_threshold),
            heard: None,
            events: rx,
            self_events: tx.downgrade(),
        };
        (widget, InputHandle { events: tx })
    }

    /// Enables voice capture through `recognizer`.
    pub fn with_recognizer(mut self, recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_listening(&self) -> bool {
        self.session.is_some()
    }

    /// Processes events until shutdown or until every handle is dropped, then
    /// tears down voice capture.
    pub async fn run(mut self) {
        while self.step().await.is_continue() {}
        self.teardown();
    }

    /// Waits for the next event and handles it.
    pub async fn step(&mut self) -> ControlFlow<()> {
        match self.events.recv().await {
            Some(Signal::Host(event)) => self.handle(event).await,
            Some(Signal::Transcript { session, text }) => {
                self.on_transcript(session, text);
                ControlFlow::Continue(())
            }
            Some(Signal::SilenceElapsed { generation }) => {
                self.on_silence(generation).await;
                ControlFlow::Continue(())
            }
            None => ControlFlow::Break(()),
        }
    }

    /// Applies one host event directly, bypassing the channel.
    pub async fn handle(&mut self, event: InputEvent) -> ControlFlow<()> {
        match event {
            InputEvent::Edit(text) => self.draft = text,
            InputEvent::Key(Key::Enter) | InputEvent::SendClicked => self.submit().await,
            InputEvent::Key(Key::Char(c)) => self.draft.push(c),
            InputEvent::Key(Key::Backspace) => {
                self.draft.pop();
            }
            InputEvent::ToggleVoice => self.toggle_voice(),
            InputEvent::Shutdown => {
                self.teardown();
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Sends the draft if it has non-whitespace content, records both turns
    /// and clears the draft. Any pending silence countdown is dropped along
    /// with the transcript it would have sent.
    pub async fn submit(&mut self) {
        if self.draft.trim().is_empty() {
            return;
        }
        self.timer.cancel();
        self.heard = None;

        let message = std::mem::take(&mut self.draft);
        self.sink.record_user_message(&message);

        let reply = match self.relay.send(&message).await {
            Ok(Some(reply)) => reply,
            Ok(None) => NO_RESPONSE_REPLY.to_string(),
            Err(e) => {
                log::error!("Chat API error: {e}");
                APOLOGY_REPLY.to_string()
            }
        };
        self.sink.record_assistant_message(&reply);
    }

    fn toggle_voice(&mut self) {
        if self.session.is_some() {
            self.stop_listening();
        } else {
            self.start_listening();
        }
    }

    fn start_listening(&mut self) {
        let Some(recognizer) = self.recognizer.clone() else {
            log::warn!("voice input requested but no speech recognizer is available");
            return;
        };

        self.next_session += 1;
        let id = self.next_session;
        match recognizer.start(TranscriptSender::new(id, self.self_events.clone())) {
            Ok(handle) => {
                log::debug!("speech recognition session {id} started");
                self.session = Some(ActiveSession { id, handle });
            }
            Err(e) => log::error!("failed to start speech recognition: {e}"),
        }
    }

    fn stop_listening(&mut self) {
        if let Some(mut active) = self.session.take() {
            active.handle.stop();
            log::debug!("speech recognition session {} stopped", active.id);
        }
        self.timer.cancel();
        self.heard = None;
    }

    fn on_transcript(&mut self, session: u64, text: String) {
        if self.session.as_ref().map(|s| s.id) != Some(session) {
            log::debug!("dropping transcript from inactive session {session}");
            return;
        }
        self.draft.clone_from(&text);
        self.heard = Some(text);
        self.timer.arm(self.self_events.clone());
    }

    async fn on_silence(&mut self, generation: u64) {
        if !self.timer.take_fired(generation) {
            return;
        }
        let Some(transcript) = self.heard.take() else {
            return;
        };
        if transcript.trim().is_empty() {
            return;
        }
        self.draft = transcript;
        self.submit().await;
    }

    fn teardown(&mut self) {
        self.stop_listening();
        self.events.close();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    struct Echo;

    #[async_trait]
    impl ChatRelay for Echo {
        async fn send(&self, message: &str) -> Result<Option<String>, InputError> {
            Ok(Some(format!("echo: {message}")))
        }
    }

    #[derive(Default)]
    struct Log(Mutex<Vec<String>>);

    impl MessageSink for Log {
        fn record_user_message(&self, text: &str) {
            self.0.lock().unwrap().push(format!("user:{text}"));
        }
        fn record_assistant_message(&self, text: &str) {
            self.0.lock().unwrap().push(format!("assistant:{text}"));
        }
    }

    fn widget() -> (ChatInput, InputHandle, Arc<Log>) {
        let log = Arc::new(Log::default());
        let config = InputConfig::new("http://localhost:5000").unwrap();
        let (w, h) = ChatInput::new(&config, Arc::new(Echo), log.clone());
        (w, h, log)
    }

    #[tokio::test]
    async fn keys_edit_the_draft() {
        let (mut w, _h, _log) = widget();
        for c in "hey".chars() {
            w.handle(InputEvent::Key(Key::Char(c))).await;
        }
        w.handle(InputEvent::Key(Key::Backspace)).await;
        assert_eq!(w.draft(), "he");
    }

    #[tokio::test]
    async fn enter_submits_and_clears() {
        let (mut w, _h, log) = widget();
        w.handle(InputEvent::Edit("hi".into())).await;
        w.handle(InputEvent::Key(Key::Enter)).await;
        assert_eq!(w.draft(), "");
        assert_eq!(*log.0.lock().unwrap(), ["user:hi", "assistant:echo: hi"]);
    }

    #[tokio::test]
    async fn toggle_without_recognizer_stays_idle() {
        let (mut w, _h, _log) = widget();
        w.handle(InputEvent::ToggleVoice).await;
        assert!(!w.is_listening());
    }

    #[tokio::test]
    async fn transcript_while_idle_is_ignored() {
        let (mut w, _h, _log) = widget();
        w.on_transcript(1, "ghost".into());
        assert_eq!(w.draft(), "");
        assert!(!w.timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn submit_disarms_pending_countdown() {
        let (mut w, _h, log) = widget();
        w.heard = Some("spoken".into());
        let generation = w.timer.arm(w.self_events.clone());

        w.handle(InputEvent::Edit("typed".into())).await;
        w.handle(InputEvent::SendClicked).await;
        assert!(!w.timer.is_armed());
        assert!(w.heard.is_none());

        w.on_silence(generation).await;
        assert_eq!(*log.0.lock().unwrap(), ["user:typed", "assistant:echo: typed"]);
    }

    #[tokio::test]
    async fn shutdown_breaks_the_loop() {
        let (mut w, _h, _log) = widget();
        assert!(w.handle(InputEvent::Shutdown).await.is_break());
    }
}
