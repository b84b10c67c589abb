//! # Action Queue
//!
//! Bounded, ordered storage for pending actions. Actions are appended while
//! recording and drained front to back on commit; [`ActionQueue::pop`] takes
//! from the back to cancel the most recent action.

use heapless::Vec;

use crate::action::DrawAction;
use crate::error::{Error, Result};

/// Maximum number of pending actions
pub const CAPACITY: usize = 4096;

/// Recording state of a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueState {
    /// Not accepting actions
    #[default]
    Idle,
    /// Between `begin` and `commit`
    Recording,
}

/// Fixed-capacity action queue
#[derive(Debug, Default)]
pub struct ActionQueue {
    actions: Vec<DrawAction, CAPACITY>,
    state: QueueState,
}

impl ActionQueue {
    /// Create an empty, idle queue
    pub const fn new() -> Self {
        Self {
            actions: Vec::new(),
            state: QueueState::Idle,
        }
    }

    /// Open a recording session, discarding anything left over
    pub fn begin(&mut self) {
        self.clear();
        self.state = QueueState::Recording;
    }

    /// Append an action
    pub fn push(&mut self, action: DrawAction) -> Result<()> {
        if self.state != QueueState::Recording {
            return Err(Error::NotRecording);
        }
        self.actions
            .push(action)
            .map_err(|_| Error::QueueFull { capacity: CAPACITY })
    }

    /// Remove the most recently pushed action
    pub fn pop(&mut self) -> Option<DrawAction> {
        self.actions.pop()
    }

    /// Drop every pending action
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }

    /// Clear and go back to idle
    pub(crate) fn finish(&mut self) {
        self.clear();
        self.state = QueueState::Idle;
    }

    /// Iterate pending actions in push order
    pub fn iter(&self) -> impl Iterator<Item = &DrawAction> {
        self.actions.iter()
    }

    /// Number of pending actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Check if at capacity
    pub fn is_full(&self) -> bool {
        self.actions.is_full()
    }

    /// Fixed capacity
    pub const fn capacity(&self) -> usize {
        CAPACITY
    }

    /// Current state
    pub fn state(&self) -> QueueState {
        self.state
    }

    /// Whether a recording session is open
    pub fn is_recording(&self) -> bool {
        self.state == QueueState::Recording
    }
}
