//! # Drawing Context
//!
//! The context ties one (optional) framebuffer, the active color mode and
//! one action queue together, and runs the commit protocol:
//!
//! ```text
//!            begin()                 commit()
//!   Idle ─────────────▶ Recording ─────────────▶ Idle
//!                        │     ▲
//!                        └─────┘ push(action)
//! ```
//!
//! A commit always drains the whole queue in push order, so later actions
//! paint over earlier ones at the same coordinate. Failures on individual
//! actions are collected in the [`CommitReport`] instead of aborting.

use core::fmt;

use heapless::Vec;

use crate::action::DrawAction;
use crate::blend;
use crate::color::ColorMode;
use crate::error::{Error, Result};
use crate::framebuffer::{Addressing, FramebufferFormat, FramebufferView, RawFramebuffer};
use crate::queue::{ActionQueue, QueueState};

/// Failures kept in a [`CommitReport`]; further ones are only counted
pub const MAX_REPORTED_FAILURES: usize = 64;

// =============================================================================
// Commit Report
// =============================================================================

/// A queued action that could not be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionFailure {
    /// Position in the queue (push order)
    pub index: usize,
    /// The action itself
    pub action: DrawAction,
    /// Why it failed
    pub error: Error,
}

/// Outcome of a commit
#[derive(Debug, Clone, Default)]
pub struct CommitReport {
    /// Pixel actions applied to the framebuffer
    pub processed: usize,
    /// Actions of unrecognized kinds, ignored
    pub skipped: usize,
    /// Actions dropped because no framebuffer was attached
    pub discarded: usize,
    /// Total number of failed actions
    pub failed: usize,
    failures: Vec<ActionFailure, MAX_REPORTED_FAILURES>,
    warning: Option<Error>,
}

impl CommitReport {
    /// Failed actions in queue order (at most [`MAX_REPORTED_FAILURES`])
    pub fn failures(&self) -> &[ActionFailure] {
        &self.failures
    }

    /// Non-fatal condition observed during the commit
    pub fn warning(&self) -> Option<Error> {
        self.warning
    }

    /// Whether every action was either drawn or deliberately skipped
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    fn record_failure(&mut self, failure: ActionFailure) {
        self.failed += 1;
        // Past the cap only the count is kept
        let _ = self.failures.push(failure);
    }
}

impl fmt::Display for CommitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} drawn, {} skipped, {} discarded, {} failed",
            self.processed, self.skipped, self.discarded, self.failed
        )
    }
}

// =============================================================================
// Drawing Context
// =============================================================================

/// Entry point for all drawing operations
pub struct DrawingContext<'fb> {
    framebuffer: Option<FramebufferView<'fb>>,
    color_mode: ColorMode,
    queue: ActionQueue,
}

impl<'fb> DrawingContext<'fb> {
    /// Create a context drawing into `view`
    pub fn new(view: FramebufferView<'fb>) -> Self {
        if view.addressing() == Addressing::Flat {
            log::warn!("{}", Error::UnsupportedFramebufferKind(view.descriptor().kind));
        }
        log::debug!(
            "fglib: attached {}x{} framebuffer at {:#x} (pitch {}, {} bpp)",
            view.width(),
            view.height(),
            view.descriptor().address,
            view.pitch(),
            view.bpp()
        );

        Self {
            framebuffer: Some(view),
            color_mode: ColorMode::default(),
            queue: ActionQueue::new(),
        }
    }

    /// Create a context without a target; commits discard their actions
    pub const fn unattached() -> Self {
        Self {
            framebuffer: None,
            color_mode: ColorMode::Rgba,
            queue: ActionQueue::new(),
        }
    }

    /// Create a context from a loader-provided pointer and format tag
    ///
    /// Only [`FramebufferFormat::FglibCustom`] attaches the descriptor; any
    /// other tag, or a missing descriptor, yields an unattached context.
    ///
    /// # Safety
    ///
    /// Same contract as [`FramebufferView::from_descriptor`].
    pub unsafe fn init(descriptor: Option<&RawFramebuffer>, format: FramebufferFormat) -> Result<Self> {
        match (format, descriptor) {
            (FramebufferFormat::FglibCustom, Some(descriptor)) => {
                // SAFETY: forwarded to the caller
                let view = unsafe { FramebufferView::from_descriptor(descriptor)? };
                Ok(Self::new(view))
            }
            (format, _) => {
                log::debug!("fglib: no framebuffer attached (format {:?})", format);
                Ok(Self::unattached())
            }
        }
    }

    /// Select the color mode used by the next commit or plot
    ///
    /// Colors already queued are not rewritten.
    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.color_mode = mode;
    }

    /// Get the active color mode
    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// Get the attached framebuffer
    pub fn framebuffer(&self) -> Option<&FramebufferView<'fb>> {
        self.framebuffer.as_ref()
    }

    /// Check if a framebuffer is attached
    pub fn is_attached(&self) -> bool {
        self.framebuffer.is_some()
    }

    /// Get the pending action queue
    pub fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    /// Number of pending actions
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Current recording state
    pub fn state(&self) -> QueueState {
        self.queue.state()
    }

    /// Whether a recording session is open
    pub fn is_recording(&self) -> bool {
        self.queue.is_recording()
    }

    /// Start a recording session with an empty queue
    pub fn begin(&mut self) {
        if self.queue.is_recording() && !self.queue.is_empty() {
            log::warn!("fglib: begin() discards {} uncommitted actions", self.queue.len());
        }
        self.queue.begin();
    }

    /// Queue an action
    pub fn push(&mut self, action: DrawAction) -> Result<()> {
        self.queue.push(action)
    }

    /// Decode and queue a raw action
    pub fn push_raw(&mut self, kind: u32, payload: [u32; 3]) -> Result<()> {
        self.push(DrawAction::decode(kind, payload))
    }

    /// Cancel the most recently queued action
    pub fn pop(&mut self) -> Option<DrawAction> {
        self.queue.pop()
    }

    /// Execute every queued action and return to idle
    pub fn commit(&mut self) -> Result<CommitReport> {
        if !self.queue.is_recording() {
            return Err(Error::NotRecording);
        }

        let mut report = CommitReport::default();
        let mode = self.color_mode;

        match self.framebuffer.as_mut() {
            None => {
                report.discarded = self.queue.len();
            }
            Some(view) => {
                if view.addressing() == Addressing::Flat {
                    report.warning = Some(Error::UnsupportedFramebufferKind(view.descriptor().kind));
                }

                for (index, action) in self.queue.iter().enumerate() {
                    match *action {
                        DrawAction::DrawPixel { x, y, color } => {
                            match blend::plot(view, mode, x, y, color) {
                                Ok(()) => report.processed += 1,
                                Err(error) => {
                                    log::debug!("fglib: action {} ({}) failed: {}", index, action, error);
                                    report.record_failure(ActionFailure {
                                        index,
                                        action: *action,
                                        error,
                                    });
                                }
                            }
                        }
                        DrawAction::Unrecognized { kind } => {
                            log::trace!("fglib: skipping action {} of unknown kind {:#x}", index, kind);
                            report.skipped += 1;
                        }
                    }
                }
            }
        }

        self.queue.finish();

        if report.is_clean() {
            log::debug!("fglib: commit: {}", report);
        } else {
            log::warn!("fglib: commit: {}", report);
        }
        Ok(report)
    }

    /// Blend a single pixel immediately, bypassing the queue
    pub fn plot(&mut self, x: i32, y: i32, color: u32) -> Result<()> {
        let view = self.framebuffer.as_mut().ok_or(Error::NoFramebuffer)?;
        blend::plot(view, self.color_mode, x, y, color)
    }
}

impl Default for DrawingContext<'_> {
    fn default() -> Self {
        Self::unattached()
    }
}

impl fmt::Debug for DrawingContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawingContext")
            .field("framebuffer", &self.framebuffer)
            .field("color_mode", &self.color_mode)
            .field("state", &self.queue.state())
            .field("queued", &self.queue.len())
            .finish()
    }
}
