//! The envelope reveal state machine.
//!
//! A shared letter is presented as a closed envelope. Opening it runs
//! a timed animation before the content becomes readable, and closing
//! it runs a shorter one before the envelope is fully shut. The
//! machine tracks when each transient phase completes; callers poll
//! it with the current instant to advance it.

use std::time::{Duration, Instant};

/// How long the opening animation runs before content is shown.
pub const OPEN_DELAY: Duration = Duration::from_millis(600);

/// How long the closing animation runs.
pub const CLOSE_DELAY: Duration = Duration::from_millis(400);

/// The envelope's presentation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Envelope shut, content hidden.
    Closed,
    /// Opening animation in progress, content still hidden.
    Opening,
    /// Envelope open, content readable.
    Open,
    /// Closing animation in progress, content hidden.
    Closing,
}

/// Tracks one envelope's reveal lifecycle.
#[derive(Debug)]
pub struct RevealMachine {
    state: RevealState,
    /// When the current transient phase completes. `None` in the
    /// stable states.
    deadline: Option<Instant>,
}

impl RevealMachine {
    /// A new machine starts closed.
    pub fn new() -> Self {
        Self {
            state: RevealState::Closed,
            deadline: None,
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Content is readable only while fully open.
    pub fn content_visible(&self) -> bool {
        self.state == RevealState::Open
    }

    /// Request the envelope be opened.
    ///
    /// From Closed this starts the opening animation. During Closing
    /// the envelope snaps shut first and a fresh opening run begins,
    /// so the full open delay always elapses before content shows.
    /// While Opening or Open the request is ignored.
    pub fn open(&mut self, now: Instant) {
        self.poll(now);
        match self.state {
            RevealState::Closed => {
                self.state = RevealState::Opening;
                self.deadline = Some(now + OPEN_DELAY);
            }
            RevealState::Closing => {
                self.state = RevealState::Opening;
                self.deadline = Some(now + OPEN_DELAY);
            }
            RevealState::Opening | RevealState::Open => {}
        }
    }

    /// Request the envelope be closed.
    ///
    /// Only meaningful while Open. Dismissing during the opening
    /// animation is ignored; the envelope finishes opening.
    pub fn dismiss(&mut self, now: Instant) {
        self.poll(now);
        if self.state == RevealState::Open {
            self.state = RevealState::Closing;
            self.deadline = Some(now + CLOSE_DELAY);
        }
    }

    /// Advance past any transient phase whose deadline has passed.
    /// Returns the state after advancement.
    pub fn poll(&mut self, now: Instant) -> RevealState {
        if let Some(deadline) = self.deadline {
            if now >= deadline {
                self.state = match self.state {
                    RevealState::Opening => RevealState::Open,
                    RevealState::Closing => RevealState::Closed,
                    stable => stable,
                };
                self.deadline = None;
            }
        }
        self.state
    }
}

impl Default for RevealMachine {
    fn default() -> Self {
        Self::new()
    }
}
