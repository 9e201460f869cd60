//! Speech-to-text seam.
//!
//! A [`SpeechRecognizer`] runs one continuous session at a time and pushes
//! every interim or final transcript through the [`TranscriptSender`] it was
//! started with. The widget owns the returned [`RecognitionSession`] and stops
//! it exactly once.

use tokio::sync::mpsc::WeakUnboundedSender;

use crate::InputError;
use crate::widget::Signal;

/// Delivers transcripts from one recognition session to the widget.
///
/// Holds only a weak link to the widget, so an abandoned session cannot keep
/// it alive. Transcripts from a stopped or replaced session are discarded by
/// the widget.
#[derive(Debug, Clone)]
pub struct TranscriptSender {
    session: u64,
    events: WeakUnboundedSender<Signal>,
}

impl TranscriptSender {
    pub(crate) fn new(session: u64, events: WeakUnboundedSender<Signal>) -> Self {
        Self { session, events }
    }

    /// Id of the session this sender belongs to.
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Pushes the latest transcript. Returns `false` once the widget is gone.
    pub fn push(&self, transcript: impl Into<String>) -> bool {
        let Some(events) = self.events.upgrade() else {
            return false;
        };
        events
            .send(Signal::Transcript {
                session: self.session,
                text: transcript.into(),
            })
            .is_ok()
    }
}

/// Handle to a running recognition session.
pub trait RecognitionSession: Send {
    fn stop(&mut self);
}

/// Starts continuous recognition sessions with interim results.
pub trait SpeechRecognizer: Send + Sync {
    fn start(&self, transcripts: TranscriptSender) -> Result<Box<dyn RecognitionSession>, InputError>;
}
