use std::time::Duration;
use tokio::time::Instant;

/// A value waiting for its quiet window to elapse.
#[derive(Debug, Clone)]
struct Pending {
    value: String,
    deadline: Instant,
}

/// Trailing-edge debouncer driven by an external clock.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    pending: Option<Pending>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Records an edit at `now`, replacing any pending value and restarting the window.
    pub fn schedule(&mut self, value: impl Into<String>, now: Instant) {
        let deadline = now + self.window;
        if self.pending.is_some() {
            tracing::trace!("Debounce restarted, commit pushed back to {:?}", deadline);
        }
        self.pending = Some(Pending {
            value: value.into(),
            deadline,
        });
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the pending value if its window has elapsed by `now`.
    pub fn poll_expired(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some(pending) if pending.deadline <= now => {
                self.pending.take().map(|pending| pending.value)
            }
            _ => None,
        }
    }

    /// Commits `current` immediately, dropping any pending value.
    pub fn submit(&mut self, current: impl Into<String>) -> String {
        if self.cancel() {
            tracing::trace!("Pending commit replaced by explicit submit");
        }
        current.into()
    }

    /// Drops the pending value. Returns `true` if something was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }
}
