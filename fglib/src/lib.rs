//! # fglib - Freestanding Graphics Library
//!
//! A minimal drawing layer for kernels and bootloaders that own a raw linear
//! framebuffer. Draw operations are recorded into a fixed-capacity queue and
//! applied in one pass on commit, alpha-blended into the target memory.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fglib::prelude::*;
//!
//! # fn demo(descriptor: &RawFramebuffer) -> fglib::Result<()> {
//! // The loader hands us a descriptor of the linear framebuffer
//! let mut ctx = unsafe { DrawingContext::init(Some(descriptor), FramebufferFormat::FglibCustom)? };
//! ctx.set_color_mode(ColorMode::Rgba);
//!
//! ctx.begin();
//! ctx.push(DrawAction::pixel(10, 10, pack_rgba(255, 0, 0, 255)))?;
//! ctx.push(DrawAction::pixel(11, 10, pack_rgba(0, 0, 255, 128)))?;
//!
//! let report = ctx.commit()?;
//! assert_eq!(report.processed, 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        FGLIB STACK                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  DrawingContext   begin / push / commit state machine        │
//! │  ActionQueue      bounded FIFO of pending DrawActions        │
//! │  BlendEngine      addressing, bounds, source-over blending   │
//! │  FramebufferView  validated view of the target memory        │
//! │  PixelCodec       channel packing for RGB / RGBA / ARGB      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! No allocation happens anywhere in the crate; every capacity is fixed and
//! stored inline in the context.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Error types
pub mod error;

/// Pixel codec and color modes
pub mod color;

/// Framebuffer descriptors and views
pub mod framebuffer;

/// Draw actions
pub mod action;

/// Deferred action queue
pub mod queue;

/// Pixel addressing and alpha compositing
pub mod blend;

/// Drawing context and commit protocol
pub mod context;

/// Shape storage
#[cfg(feature = "shapes")]
pub mod shape;

/// Lock-guarded drawing context
#[cfg(feature = "shared")]
pub mod shared;


// =============================================================================
// Re-exports
// =============================================================================

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{ActionKind, DrawAction};
    pub use crate::color::{pack_argb, pack_rgb, pack_rgba, unpack, Channels, ColorMode};
    pub use crate::context::{ActionFailure, CommitReport, DrawingContext};
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::{
        Addressing, FramebufferFormat, FramebufferKind, FramebufferView, LimineFramebuffer,
        RawFramebuffer,
    };
    pub use crate::queue::{ActionQueue, QueueState};

    #[cfg(feature = "shapes")]
    pub use crate::shape::{Point, Shape, ShapeMode};

    #[cfg(feature = "shared")]
    pub use crate::shared::SharedContext;
}
