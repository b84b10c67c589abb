//! # Draw Actions
//!
//! Actions are small `Copy` values recorded into the queue and executed on
//! commit. Producers that speak the raw wire form (a kind tag plus a
//! three-word payload) go through [`DrawAction::decode`].

use core::fmt;

/// Action kind tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ActionKind {
    /// Blend a single pixel
    DrawPixel = 0x01,
}

impl ActionKind {
    /// Decode a raw kind tag
    pub const fn from_raw(value: u32) -> Option<Self> {
        match value {
            0x01 => Some(Self::DrawPixel),
            _ => None,
        }
    }
}

/// A pending draw operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawAction {
    /// Blend `color` into the pixel at (`x`, `y`)
    DrawPixel {
        /// Column
        x: i32,
        /// Row
        y: i32,
        /// Packed color
        color: u32,
    },
    /// An action whose kind this build does not handle
    Unrecognized {
        /// Raw kind tag
        kind: u32,
    },
}

impl DrawAction {
    /// Create a pixel action
    pub const fn pixel(x: i32, y: i32, color: u32) -> Self {
        Self::DrawPixel { x, y, color }
    }

    /// Decode a raw action
    ///
    /// The pixel payload is `[color, x, y]`; coordinates are reinterpreted
    /// as signed so negative values surface as out-of-bounds on commit.
    pub const fn decode(kind: u32, payload: [u32; 3]) -> Self {
        match ActionKind::from_raw(kind) {
            Some(ActionKind::DrawPixel) => Self::DrawPixel {
                x: payload[1] as i32,
                y: payload[2] as i32,
                color: payload[0],
            },
            None => Self::Unrecognized { kind },
        }
    }

    /// Raw kind tag of this action
    pub const fn kind(&self) -> u32 {
        match self {
            Self::DrawPixel { .. } => ActionKind::DrawPixel as u32,
            Self::Unrecognized { kind } => *kind,
        }
    }
}

impl fmt::Display for DrawAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DrawPixel { x, y, color } => {
                write!(f, "DrawPixel({}, {}, {:#010x})", x, y, color)
            }
            Self::Unrecognized { kind } => write!(f, "Unrecognized({:#x})", kind),
        }
    }
}
