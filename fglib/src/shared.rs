//! # Shared Context
//!
//! A [`DrawingContext`] behind a spin lock. The lock is held from `begin`
//! through `commit`, so batches from different callers never interleave.

use spin::{Mutex, MutexGuard};

use crate::color::ColorMode;
use crate::context::{CommitReport, DrawingContext};
use crate::error::Result;

/// Lock-guarded drawing context
#[derive(Debug)]
pub struct SharedContext<'fb> {
    inner: Mutex<DrawingContext<'fb>>,
}

impl<'fb> SharedContext<'fb> {
    /// Wrap a context
    pub const fn new(ctx: DrawingContext<'fb>) -> Self {
        Self {
            inner: Mutex::new(ctx),
        }
    }

    /// Record and commit one batch under the lock
    ///
    /// `record` runs with the context already recording. Whatever it queued
    /// is committed even if it returns an error; that error is then returned
    /// in place of the report.
    pub fn batch<F>(&self, record: F) -> Result<CommitReport>
    where
        F: FnOnce(&mut DrawingContext<'fb>) -> Result<()>,
    {
        let mut ctx = self.inner.lock();
        ctx.begin();
        let recorded = record(&mut *ctx);
        // The closure may have committed on its own
        if !ctx.is_recording() {
            ctx.begin();
        }
        let report = ctx.commit()?;
        recorded.map(|()| report)
    }

    /// Change the color mode used by later batches
    pub fn set_color_mode(&self, mode: ColorMode) {
        self.inner.lock().set_color_mode(mode);
    }

    /// Lock the context for direct use
    pub fn lock(&self) -> MutexGuard<'_, DrawingContext<'fb>> {
        self.inner.lock()
    }

    /// Unwrap the context
    pub fn into_inner(self) -> DrawingContext<'fb> {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::DrawAction;
    use crate::color::pack_rgba;
    use crate::error::Error;
    use crate::framebuffer::{FramebufferKind, FramebufferView, RawFramebuffer};

    #[test]
    fn test_batch_commits() {
        let mut memory = vec![0u8; 64];
        let raw = RawFramebuffer::packed32(FramebufferKind::FglibCustom, 0, 4, 4, 16);
        let view = FramebufferView::from_slice(&mut memory, raw).unwrap();
        let shared = SharedContext::new(DrawingContext::new(view));

        let report = shared
            .batch(|ctx| {
                ctx.push(DrawAction::pixel(0, 0, pack_rgba(4, 5, 6, 255)))?;
                ctx.push(DrawAction::pixel(1, 0, pack_rgba(7, 8, 9, 255)))
            })
            .unwrap();
        assert_eq!(report.processed, 2);
        assert!(!shared.lock().is_recording());
        drop(shared);

        assert_eq!(&memory[0..8], &[255, 4, 5, 6, 255, 7, 8, 9]);
    }

    #[test]
    fn test_batch_error_still_commits() {
        let shared = SharedContext::new(DrawingContext::unattached());
        let result = shared.batch(|ctx| {
            ctx.push(DrawAction::pixel(0, 0, 0))?;
            Err(Error::NoFramebuffer)
        });
        assert_eq!(result.unwrap_err(), Error::NoFramebuffer);

        let ctx = shared.into_inner();
        assert_eq!(ctx.queue_len(), 0);
        assert!(!ctx.is_recording());
    }

    #[test]
    fn test_shared_color_mode() {
        let shared = SharedContext::new(DrawingContext::unattached());
        shared.set_color_mode(ColorMode::Rgb);
        assert_eq!(shared.lock().color_mode(), ColorMode::Rgb);
    }
}
