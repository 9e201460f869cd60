//! Silence timer for voice capture.
//!
//! At most one countdown is pending. Arming cancels the previous countdown
//! first; a countdown that completes posts a `SilenceElapsed` signal
//! tagged with its generation, and only the current generation is honoured.

use std::time::Duration;

use tokio::sync::mpsc::WeakUnboundedSender;
use tokio_util::sync::CancellationToken;

use crate::widget::Signal;

#[derive(Debug)]
struct Pending {
    generation: u64,
    token: CancellationToken,
}

#[derive(Debug)]
pub struct SilenceTimer {
    threshold: Duration,
    generation: u64,
    pending: Option<Pending>,
}

impl SilenceTimer {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            generation: 0,
            pending: None,
        }
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Cancels any pending countdown and starts a new one. Returns its generation.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn arm(&mut self, events: WeakUnboundedSender<Signal>) -> u64 {
        self.cancel();
        self.generation += 1;

        let generation = self.generation;
        let token = CancellationToken::new();
        let threshold = self.threshold;
        tokio::spawn({
            let token = token.clone();
            async move {
                tokio::select! {
                    _ = token.cancelled() => {}
                    _ = tokio::time::sleep(threshold) => {
                        if let Some(events) = events.upgrade() {
                            let _ = events.send(Signal::SilenceElapsed { generation });
                        }
                    }
                }
            }
        });

        self.pending = Some(Pending { generation, token });
        generation
    }

    /// Cancels the pending countdown, if any. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.token.cancel();
        }
    }

    /// Consumes a firing. `true` only for the countdown currently pending;
    /// stale firings leave the timer untouched.
    pub fn take_fired(&mut self, generation: u64) -> bool {
        match &self.pending {
            Some(p) if p.generation == generation => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

impl Drop for SilenceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    const THRESHOLD: Duration = Duration::from_millis(5000);

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_threshold() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = SilenceTimer::new(THRESHOLD);
        let generation = timer.arm(tx.downgrade());

        tokio::time::sleep(Duration::from_millis(4999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        match rx.try_recv() {
            Ok(Signal::SilenceElapsed { generation: g }) => assert_eq!(g, generation),
            other => panic!("expected SilenceElapsed, got {other:?}"),
        }
        assert!(timer.take_fired(generation));
        assert!(!timer.is_armed());
        assert!(!timer.take_fired(generation));
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_cancels_previous_countdown() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = SilenceTimer::new(THRESHOLD);
        let first = timer.arm(tx.downgrade());

        tokio::time::sleep(Duration::from_millis(4999)).await;
        let second = timer.arm(tx.downgrade());
        assert_ne!(first, second);

        tokio::time::sleep(Duration::from_millis(4999)).await;
        assert!(rx.try_recv().is_err(), "first countdown must not fire");

        tokio::time::sleep(Duration::from_millis(2)).await;
        match rx.try_recv() {
            Ok(Signal::SilenceElapsed { generation }) => assert_eq!(generation, second),
            other => panic!("expected SilenceElapsed, got {other:?}"),
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_is_idempotent_and_silences_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = SilenceTimer::new(THRESHOLD);
        timer.arm(tx.downgrade());
        timer.cancel();
        timer.cancel();

        tokio::time::sleep(THRESHOLD * 2).await;
        assert!(rx.try_recv().is_err());
        assert!(!timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_generation_is_ignored() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut timer = SilenceTimer::new(THRESHOLD);
        let first = timer.arm(tx.downgrade());
        let second = timer.arm(tx.downgrade());

        assert!(!timer.take_fired(first));
        assert!(timer.is_armed());
        assert!(timer.take_fired(second));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_timer_cancels_countdown() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let mut timer = SilenceTimer::new(THRESHOLD);
            timer.arm(tx.downgrade());
        }
        tokio::time::sleep(THRESHOLD * 2).await;
        assert!(rx.try_recv().is_err());
    }
}
