//! # Framebuffer Views
//!
//! A [`FramebufferView`] is the validated, lifetime-bound form of a
//! [`RawFramebuffer`] descriptor. Once built it never changes; the blend
//! engine is the only code that touches the memory behind it.

mod raw;

pub use raw::{LimineFramebuffer, RawFramebuffer};

use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::error::{Error, Result};

/// Known framebuffer kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u64)]
pub enum FramebufferKind {
    /// fglib's own descriptor layout
    FglibCustom = 0x01,
    /// Framebuffer reported by the Limine boot protocol
    Limine = 0x02,
}

impl FramebufferKind {
    /// Decode a raw kind identifier
    pub const fn from_raw(value: u64) -> Option<Self> {
        match value {
            0x01 => Some(Self::FglibCustom),
            0x02 => Some(Self::Limine),
            _ => None,
        }
    }
}

/// How the pointer passed to context initialization is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferFormat {
    /// The pointer is a [`RawFramebuffer`]
    FglibCustom,
    /// The pointer is a Limine framebuffer (not attached directly)
    Limine,
    /// Any other tag
    Unknown(u64),
}

impl From<u64> for FramebufferFormat {
    fn from(tag: u64) -> Self {
        match FramebufferKind::from_raw(tag) {
            Some(FramebufferKind::FglibCustom) => Self::FglibCustom,
            Some(FramebufferKind::Limine) => Self::Limine,
            None => Self::Unknown(tag),
        }
    }
}

/// Pixel addressing scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// `y * pitch + x * bytes_per_pixel`
    Pitched,
    /// `y * width + x`, used when the kind carries no layout information
    Flat,
}

/// Validated view of a linear framebuffer
pub struct FramebufferView<'fb> {
    descriptor: RawFramebuffer,
    base: NonNull<u8>,
    size: usize,
    _memory: PhantomData<&'fb mut [u8]>,
}

// The view is the single writer of its memory; moving it to another
// context owner is fine, sharing it is not.
unsafe impl Send for FramebufferView<'_> {}

impl<'fb> FramebufferView<'fb> {
    /// Build a view over the memory a descriptor points at
    ///
    /// # Safety
    ///
    /// `descriptor.address` must point to at least `pitch * height` bytes
    /// that are writable for `'fb` and not accessed through any other path
    /// while the view exists.
    pub unsafe fn from_descriptor(descriptor: &RawFramebuffer) -> Result<Self> {
        let size = validate(descriptor)?;
        let base = usize::try_from(descriptor.address)
            .ok()
            .and_then(|addr| NonNull::new(addr as *mut u8))
            .ok_or(Error::InvalidFramebuffer {
                field: "address",
                reason: "null or not addressable",
            })?;

        Ok(Self {
            descriptor: *descriptor,
            base,
            size,
            _memory: PhantomData,
        })
    }

    /// Build a view over borrowed memory
    ///
    /// The descriptor's address is replaced by the slice's.
    pub fn from_slice(memory: &'fb mut [u8], mut descriptor: RawFramebuffer) -> Result<Self> {
        let size = validate(&descriptor)?;
        if memory.len() < size {
            return Err(Error::InvalidFramebuffer {
                field: "address",
                reason: "backing memory smaller than pitch * height",
            });
        }

        let base = NonNull::from(memory).cast::<u8>();
        descriptor.address = base.as_ptr() as u64;
        Ok(Self {
            descriptor,
            base,
            size,
            _memory: PhantomData,
        })
    }

    /// Get the descriptor this view was built from
    pub fn descriptor(&self) -> &RawFramebuffer {
        &self.descriptor
    }

    /// Get the framebuffer kind, if known
    pub fn kind(&self) -> Option<FramebufferKind> {
        FramebufferKind::from_raw(self.descriptor.kind)
    }

    /// Get the width in pixels
    pub fn width(&self) -> u32 {
        self.descriptor.width
    }

    /// Get the height in pixels
    pub fn height(&self) -> u32 {
        self.descriptor.height
    }

    /// Get the pitch (bytes per row)
    pub fn pitch(&self) -> u32 {
        self.descriptor.pitch
    }

    /// Get the bits per pixel
    pub fn bpp(&self) -> u16 {
        self.descriptor.bpp
    }

    /// Get the bytes per pixel
    pub fn bytes_per_pixel(&self) -> usize {
        usize::from(self.descriptor.bpp / 8)
    }

    /// Get the total size in bytes
    pub fn size(&self) -> usize {
        self.size
    }

    /// Addressing scheme selected by the kind
    pub fn addressing(&self) -> Addressing {
        match self.kind() {
            Some(FramebufferKind::FglibCustom | FramebufferKind::Limine) => Addressing::Pitched,
            None => Addressing::Flat,
        }
    }

    /// Check whether a coordinate lies on the surface
    pub fn contains(&self, x: i32, y: i32) -> bool {
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) => x < self.width() && y < self.height(),
            _ => false,
        }
    }

    /// Copy `out.len()` bytes starting at `offset` out of the framebuffer
    ///
    /// Returns `None` without reading when the window leaves the surface.
    pub(crate) fn load(&self, offset: usize, out: &mut [u8]) -> Option<()> {
        self.window(offset, out.len())?;
        for (i, byte) in out.iter_mut().enumerate() {
            // SAFETY: the window was checked against the validated extent
            *byte = unsafe { self.base.as_ptr().add(offset + i).read_volatile() };
        }
        Some(())
    }

    /// Copy `bytes` into the framebuffer starting at `offset`
    ///
    /// Returns `None` without writing when the window leaves the surface.
    pub(crate) fn store(&mut self, offset: usize, bytes: &[u8]) -> Option<()> {
        self.window(offset, bytes.len())?;
        for (i, byte) in bytes.iter().enumerate() {
            // SAFETY: the window was checked against the validated extent
            unsafe { self.base.as_ptr().add(offset + i).write_volatile(*byte) };
        }
        Some(())
    }

    fn window(&self, offset: usize, len: usize) -> Option<()> {
        let end = offset.checked_add(len)?;
        (end <= self.size).then_some(())
    }
}

impl core::fmt::Debug for FramebufferView<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FramebufferView")
            .field("kind", &self.descriptor.kind)
            .field("address", &format_args!("{:#x}", self.descriptor.address))
            .field("width", &self.width())
            .field("height", &self.height())
            .field("pitch", &self.pitch())
            .field("bpp", &self.bpp())
            .finish()
    }
}

/// Check descriptor invariants and return the byte extent
fn validate(descriptor: &RawFramebuffer) -> Result<usize> {
    if descriptor.bpp != 24 && descriptor.bpp != 32 {
        return Err(Error::InvalidFramebuffer {
            field: "bpp",
            reason: "only 24 and 32 bits per pixel are supported",
        });
    }
    if descriptor.width == 0 || descriptor.height == 0 {
        return Err(Error::InvalidFramebuffer {
            field: "width",
            reason: "surface has no pixels",
        });
    }

    let row_bytes = u64::from(descriptor.width) * u64::from(descriptor.bpp / 8);
    if u64::from(descriptor.pitch) < row_bytes {
        return Err(Error::InvalidFramebuffer {
            field: "pitch",
            reason: "shorter than one row of pixels",
        });
    }

    let size = u64::from(descriptor.pitch) * u64::from(descriptor.height);
    usize::try_from(size).map_err(|_| Error::InvalidFramebuffer {
        field: "pitch",
        reason: "surface larger than the address space",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tags() {
        assert_eq!(FramebufferFormat::from(0x01), FramebufferFormat::FglibCustom);
        assert_eq!(FramebufferFormat::from(0x02), FramebufferFormat::Limine);
        assert_eq!(FramebufferFormat::from(0x00), FramebufferFormat::Unknown(0));
    }

    #[test]
    fn test_view_from_slice() {
        let mut memory = vec![0u8; 64];
        let raw = RawFramebuffer::packed32(FramebufferKind::FglibCustom, 0, 4, 4, 16);
        let view = FramebufferView::from_slice(&mut memory, raw).unwrap();

        assert_eq!(view.size(), 64);
        assert_eq!(view.bytes_per_pixel(), 4);
        assert_eq!(view.addressing(), Addressing::Pitched);
        assert_ne!(view.descriptor().address, 0);
        assert!(view.contains(3, 3));
        assert!(!view.contains(4, 0));
        assert!(!view.contains(-1, 0));
    }

    #[test]
    fn test_unknown_kind_uses_flat_addressing() {
        let mut memory = vec![0u8; 64];
        let mut raw = RawFramebuffer::packed32(FramebufferKind::FglibCustom, 0, 4, 4, 16);
        raw.kind = 0x7F;
        let view = FramebufferView::from_slice(&mut memory, raw).unwrap();
        assert_eq!(view.kind(), None);
        assert_eq!(view.addressing(), Addressing::Flat);
    }

    #[test]
    fn test_validation() {
        let mut memory = vec![0u8; 64];

        let mut raw = RawFramebuffer::packed32(FramebufferKind::FglibCustom, 0, 4, 4, 16);
        raw.bpp = 16;
        assert!(matches!(
            FramebufferView::from_slice(&mut memory, raw),
            Err(Error::InvalidFramebuffer { field: "bpp", .. })
        ));

        let raw = RawFramebuffer::packed32(FramebufferKind::FglibCustom, 0, 4, 4, 12);
        assert!(matches!(
            FramebufferView::from_slice(&mut memory, raw),
            Err(Error::InvalidFramebuffer { field: "pitch", .. })
        ));

        let raw = RawFramebuffer::packed32(FramebufferKind::FglibCustom, 0, 4, 8, 16);
        assert!(matches!(
            FramebufferView::from_slice(&mut memory, raw),
            Err(Error::InvalidFramebuffer { field: "address", .. })
        ));
    }

    #[test]
    fn test_null_descriptor_address() {
        let raw = RawFramebuffer::packed32(FramebufferKind::FglibCustom, 0, 4, 4, 16);
        let result = unsafe { FramebufferView::from_descriptor(&raw) };
        assert!(matches!(result, Err(Error::InvalidFramebuffer { field: "address", .. })));
    }

    #[test]
    fn test_store_and_load_stay_in_extent() {
        let mut memory = vec![0u8; 64];
        let raw = RawFramebuffer::packed32(FramebufferKind::FglibCustom, 0, 4, 4, 16);
        let mut view = FramebufferView::from_slice(&mut memory, raw).unwrap();

        assert!(view.store(60, &[1, 2, 3, 4]).is_some());
        assert!(view.store(61, &[1, 2, 3, 4]).is_none());

        let mut out = [0u8; 4];
        assert!(view.load(60, &mut out).is_some());
        assert_eq!(out, [1, 2, 3, 4]);
        assert!(view.load(usize::MAX, &mut out).is_none());
    }
}
