//! Trailing-edge debounce for the free-text box.
//!
//! The debouncer owns no timer. The caller's event loop passes `now` in and
//! asks [`QueryDebouncer::deadline`] when to poll next, so there is at most one
//! pending deadline and replacing it is an assignment.

use std::time::{Duration, Instant};


#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DebounceState {
    #[default]
    Idle,
    PendingQueryCommit { pending: String, deadline: Instant },
}

#[derive(Debug, Clone)]
pub struct QueryDebouncer {
    window: Duration,
    state: DebounceState,
}

impl QueryDebouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, state: DebounceState::Idle }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn state(&self) -> &DebounceState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DebounceState::Idle)
    }

    pub fn pending(&self) -> Option<&str> {
        match &self.state {
            DebounceState::Idle => None,
            DebounceState::PendingQueryCommit { pending, .. } => Some(pending),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            DebounceState::Idle => None,
            DebounceState::PendingQueryCommit { deadline, .. } => Some(*deadline),
        }
    }

    /// Records a text edit. Restarts the window whether or not one was running.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.state = DebounceState::PendingQueryCommit { pending: text.into(), deadline: now + self.window };
    }

    /// Hands out the pending text once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.flush(),
            _ => None,
        }
    }

    /// Hands out the pending text immediately, e.g. on Enter.
    pub fn flush(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            DebounceState::Idle => None,
            DebounceState::PendingQueryCommit { pending, .. } => Some(pending),
        }
    }

    /// Drops any pending text. Returns whether something was pending.
    pub fn cancel(&mut self) -> bool {
        self.flush().is_some()
    }
}
