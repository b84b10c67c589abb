//! Raw framebuffer descriptors.
//!
//! These structures are handed in by the loader and must match its layout
//! byte for byte. Do not reorder or resize fields.

use core::mem::{align_of, offset_of, size_of};

use static_assertions::const_assert_eq;

use crate::error::{Error, Result};
use super::FramebufferKind;

/// fglib framebuffer descriptor
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawFramebuffer {
    /// Framebuffer kind identifier (see [`FramebufferKind`])
    pub kind: u64,
    /// Loader-assigned framebuffer identifier
    pub id: u64,
    /// Base address of the framebuffer
    pub address: u64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Bytes per row
    pub pitch: u32,
    /// Bits per pixel
    pub bpp: u16,
    /// Red mask size
    pub red_mask_size: u8,
    /// Red mask shift
    pub red_mask_shift: u8,
    /// Green mask size
    pub green_mask_size: u8,
    /// Green mask shift
    pub green_mask_shift: u8,
    /// Blue mask size
    pub blue_mask_size: u8,
    /// Blue mask shift
    pub blue_mask_shift: u8,
    /// Alpha mask size
    pub alpha_mask_size: u8,
    /// Alpha mask shift
    pub alpha_mask_shift: u8,
}

const_assert_eq!(size_of::<RawFramebuffer>(), 48);
const_assert_eq!(align_of::<RawFramebuffer>(), 8);
const_assert_eq!(offset_of!(RawFramebuffer, id), 8);
const_assert_eq!(offset_of!(RawFramebuffer, address), 16);
const_assert_eq!(offset_of!(RawFramebuffer, width), 24);
const_assert_eq!(offset_of!(RawFramebuffer, pitch), 32);
const_assert_eq!(offset_of!(RawFramebuffer, bpp), 36);
const_assert_eq!(offset_of!(RawFramebuffer, red_mask_size), 38);
const_assert_eq!(offset_of!(RawFramebuffer, alpha_mask_shift), 45);

impl RawFramebuffer {
    /// Describe a 32-bit packed surface with 8-bit channels
    pub const fn packed32(kind: FramebufferKind, address: u64, width: u32, height: u32, pitch: u32) -> Self {
        Self {
            kind: kind as u64,
            id: 0,
            address,
            width,
            height,
            pitch,
            bpp: 32,
            red_mask_size: 8,
            red_mask_shift: 16,
            green_mask_size: 8,
            green_mask_shift: 8,
            blue_mask_size: 8,
            blue_mask_shift: 0,
            alpha_mask_size: 8,
            alpha_mask_shift: 24,
        }
    }

    /// Describe a 24-bit packed surface with 8-bit channels
    pub const fn packed24(kind: FramebufferKind, address: u64, width: u32, height: u32, pitch: u32) -> Self {
        Self {
            kind: kind as u64,
            id: 0,
            address,
            width,
            height,
            pitch,
            bpp: 24,
            red_mask_size: 8,
            red_mask_shift: 16,
            green_mask_size: 8,
            green_mask_shift: 8,
            blue_mask_size: 8,
            blue_mask_shift: 0,
            alpha_mask_size: 0,
            alpha_mask_shift: 0,
        }
    }

    /// Convert a Limine framebuffer entry
    ///
    /// Limine reports geometry as 64-bit values; anything that does not fit
    /// the 32-bit descriptor fields is rejected.
    pub fn from_limine(fb: &LimineFramebuffer, id: u64) -> Result<Self> {
        let narrow = |value: u64, field: &'static str| {
            u32::try_from(value).map_err(|_| Error::InvalidFramebuffer {
                field,
                reason: "does not fit in 32 bits",
            })
        };

        Ok(Self {
            kind: FramebufferKind::Limine as u64,
            id,
            address: fb.address as u64,
            width: narrow(fb.width, "width")?,
            height: narrow(fb.height, "height")?,
            pitch: narrow(fb.pitch, "pitch")?,
            bpp: fb.bpp,
            red_mask_size: fb.red_mask_size,
            red_mask_shift: fb.red_mask_shift,
            green_mask_size: fb.green_mask_size,
            green_mask_shift: fb.green_mask_shift,
            blue_mask_size: fb.blue_mask_size,
            blue_mask_shift: fb.blue_mask_shift,
            alpha_mask_size: 0,
            alpha_mask_shift: 0,
        })
    }
}

/// Limine boot protocol framebuffer entry
#[repr(C)]
#[derive(Debug)]
pub struct LimineFramebuffer {
    /// Address of the framebuffer (HHDM mapped)
    pub address: *mut u8,
    /// Width in pixels
    pub width: u64,
    /// Height in pixels
    pub height: u64,
    /// Pitch (bytes per row)
    pub pitch: u64,
    /// Bits per pixel
    pub bpp: u16,
    /// Memory model (1 = RGB)
    pub memory_model: u8,
    /// Red mask size
    pub red_mask_size: u8,
    /// Red mask shift
    pub red_mask_shift: u8,
    /// Green mask size
    pub green_mask_size: u8,
    /// Green mask shift
    pub green_mask_shift: u8,
    /// Blue mask size
    pub blue_mask_size: u8,
    /// Blue mask shift
    pub blue_mask_shift: u8,
    /// Unused bytes for alignment
    pub unused: [u8; 7],
    /// EDID size
    pub edid_size: u64,
    /// EDID data pointer
    pub edid: *const u8,
}

#[cfg(target_pointer_width = "64")]
const_assert_eq!(size_of::<LimineFramebuffer>(), 64);
