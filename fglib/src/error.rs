//! # Error Types
//!
//! Every fallible operation in the crate returns [`Error`]. None of the kinds
//! is fatal on its own; the caller decides what to escalate.

use core::fmt;

/// Main error type for fglib operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The action queue is at capacity
    QueueFull {
        /// Fixed queue capacity
        capacity: usize,
    },
    /// A push or commit was attempted outside a recording session
    NotRecording,
    /// No framebuffer is attached to the context
    NoFramebuffer,
    /// Coordinates fall outside the framebuffer
    OutOfBounds {
        /// Requested column
        x: i32,
        /// Requested row
        y: i32,
        /// Framebuffer width in pixels
        width: u32,
        /// Framebuffer height in pixels
        height: u32,
    },
    /// The framebuffer kind has no pitch-based layout; flat addressing is used
    UnsupportedFramebufferKind(u64),
    /// A framebuffer descriptor failed validation
    InvalidFramebuffer {
        /// Offending descriptor field
        field: &'static str,
        /// What is wrong with it
        reason: &'static str,
    },
    /// A shape was built from more points than it can store
    TooManyPoints {
        /// Points supplied
        count: usize,
        /// Shape capacity
        max: usize,
    },
}

impl Error {
    /// Whether this error only signals degraded behaviour
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::UnsupportedFramebufferKind(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueFull { capacity } => {
                write!(f, "Action queue full ({} actions)", capacity)
            }
            Self::NotRecording => write!(f, "Context is not recording"),
            Self::NoFramebuffer => write!(f, "No framebuffer attached"),
            Self::OutOfBounds { x, y, width, height } => {
                write!(f, "Pixel ({}, {}) outside {}x{} framebuffer", x, y, width, height)
            }
            Self::UnsupportedFramebufferKind(kind) => {
                write!(f, "Unsupported framebuffer kind {:#x}, using flat addressing", kind)
            }
            Self::InvalidFramebuffer { field, reason } => {
                write!(f, "Invalid framebuffer '{}': {}", field, reason)
            }
            Self::TooManyPoints { count, max } => {
                write!(f, "Too many shape points: {} (max {})", count, max)
            }
        }
    }
}

/// Result type alias for fglib operations
pub type Result<T> = core::result::Result<T, Error>;
