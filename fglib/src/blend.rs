//! # Blend Engine
//!
//! Pixel addressing and source-over compositing against a
//! [`FramebufferView`].
//!
//! Each plotted pixel is a single read-modify-write: the destination is read
//! in the active [`ColorMode`] layout, blended with the source, and written
//! back in that same layout. The write is not atomic.
//!
//! ## Compositing
//!
//! With integer floor division throughout:
//!
//! ```text
//! out_a = dst_a + ((255 - dst_a) * src_a) / 255
//! out_c = (src_c * src_a) / 255 + (dst_c * dst_a * (255 - src_a)) / (255 * 255)
//! ```
//!
//! The destination term is not renormalized by `out_a`, so this is not
//! textbook source-over for translucent destinations.

use crate::color::{Channels, ColorMode};
use crate::error::{Error, Result};
use crate::framebuffer::{Addressing, FramebufferView};

/// Blend two colors
pub const fn composite(src: Channels, dst: Channels) -> Channels {
    let src_a = src.a as u32;
    let dst_a = dst.a as u32;

    Channels {
        r: blend_channel(src.r, src_a, dst.r, dst_a),
        g: blend_channel(src.g, src_a, dst.g, dst_a),
        b: blend_channel(src.b, src_a, dst.b, dst_a),
        a: (dst_a + ((255 - dst_a) * src_a) / 255) as u8,
    }
}

// Both terms are floored separately; their sum never exceeds 255.
const fn blend_channel(src: u8, src_a: u32, dst: u8, dst_a: u32) -> u8 {
    ((src as u32 * src_a) / 255 + (dst as u32 * dst_a * (255 - src_a)) / (255 * 255)) as u8
}

/// Byte offset of a pixel
///
/// Fails with [`Error::OutOfBounds`] for coordinates outside the surface.
pub fn pixel_offset(view: &FramebufferView<'_>, x: i32, y: i32) -> Result<usize> {
    let out_of_bounds = Error::OutOfBounds {
        x,
        y,
        width: view.width(),
        height: view.height(),
    };
    if !view.contains(x, y) {
        return Err(out_of_bounds);
    }

    // contains() guarantees both are non-negative
    let (x, y) = (x as usize, y as usize);
    let offset = match view.addressing() {
        Addressing::Pitched => y
            .checked_mul(view.pitch() as usize)
            .and_then(|row| row.checked_add(x * view.bytes_per_pixel())),
        Addressing::Flat => y
            .checked_mul(view.width() as usize)
            .and_then(|row| row.checked_add(x)),
    };
    offset.ok_or(out_of_bounds)
}

/// Blend `color` into the pixel at (`x`, `y`)
///
/// In [`ColorMode::Rgb`] the source is treated as fully opaque and only
/// three bytes are touched. A source with zero alpha leaves the pixel alone.
pub fn plot(view: &mut FramebufferView<'_>, mode: ColorMode, x: i32, y: i32, color: u32) -> Result<()> {
    let offset = pixel_offset(view, x, y)?;
    let out_of_bounds = Error::OutOfBounds {
        x,
        y,
        width: view.width(),
        height: view.height(),
    };

    let mut src = Channels::unpack(color);
    if !mode.has_alpha() {
        src.a = 255;
    }

    let width = mode.bytes_per_pixel();
    let mut bytes = [0u8; 4];
    let pixel = &mut bytes[..width];
    view.load(offset, pixel).ok_or(out_of_bounds)?;

    if src.a == 0 {
        return Ok(());
    }

    let blended = composite(src, mode.read(pixel));
    mode.write(blended, pixel);
    view.store(offset, pixel).ok_or(out_of_bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::pack_rgba;
    use crate::framebuffer::{FramebufferKind, RawFramebuffer};

    fn custom_4x4() -> RawFramebuffer {
        RawFramebuffer::packed32(FramebufferKind::FglibCustom, 0, 4, 4, 16)
    }

    #[test]
    fn test_composite_opaque_source() {
        let dst = Channels::new(10, 20, 30, 40);
        let out = composite(Channels::new(200, 100, 50, 255), dst);
        assert_eq!(out, Channels::new(200, 100, 50, 255));
    }

    #[test]
    fn test_composite_half_alpha() {
        let src = Channels::new(255, 0, 0, 128);
        let dst = Channels::new(0, 0, 255, 255);
        // r: 255*128/255 = 128; b: 255*255*127/65025 = 127
        assert_eq!(composite(src, dst), Channels::new(128, 0, 127, 255));
    }

    #[test]
    fn test_composite_onto_transparent_destination() {
        let src = Channels::new(100, 100, 100, 51);
        let dst = Channels::new(255, 255, 255, 0);
        // 100*51/255 = 20; destination contributes nothing; alpha 0 + 255*51/255
        assert_eq!(composite(src, dst), Channels::new(20, 20, 20, 51));
    }

    #[test]
    fn test_composite_stays_within_byte() {
        for src_a in [1u8, 64, 128, 200, 254] {
            let out = composite(Channels::new(255, 255, 255, src_a), Channels::new(255, 255, 255, 255));
            assert!(out.r >= 254, "src_a={} r={}", src_a, out.r);
            assert_eq!(out.a, 255);
        }
    }

    #[test]
    fn test_pitched_offset() {
        let mut memory = vec![0u8; 64];
        let view = FramebufferView::from_slice(&mut memory, custom_4x4()).unwrap();
        assert_eq!(pixel_offset(&view, 1, 1), Ok(20));
        assert_eq!(pixel_offset(&view, 3, 3), Ok(60));
    }

    #[test]
    fn test_flat_offset() {
        let mut memory = vec![0u8; 64];
        let mut raw = custom_4x4();
        raw.kind = 0x99;
        let view = FramebufferView::from_slice(&mut memory, raw).unwrap();
        assert_eq!(pixel_offset(&view, 1, 1), Ok(5));
        assert_eq!(pixel_offset(&view, 3, 2), Ok(11));
    }

    #[test]
    fn test_offset_bounds() {
        let mut memory = vec![0u8; 64];
        let view = FramebufferView::from_slice(&mut memory, custom_4x4()).unwrap();
        let expected = Error::OutOfBounds { x: 4, y: 0, width: 4, height: 4 };
        assert_eq!(pixel_offset(&view, 4, 0), Err(expected));
        assert!(pixel_offset(&view, 0, -1).is_err());
        assert!(pixel_offset(&view, i32::MIN, i32::MAX).is_err());
    }

    #[test]
    fn test_plot_transparent_source_is_noop() {
        let mut memory = vec![0x5Au8; 64];
        {
            let mut view = FramebufferView::from_slice(&mut memory, custom_4x4()).unwrap();
            plot(&mut view, ColorMode::Rgba, 2, 2, pack_rgba(255, 255, 255, 0)).unwrap();
        }
        assert!(memory.iter().all(|&b| b == 0x5A));
    }

    #[test]
    fn test_plot_opaque_source_rgba() {
        let mut memory = vec![0x33u8; 64];
        {
            let mut view = FramebufferView::from_slice(&mut memory, custom_4x4()).unwrap();
            plot(&mut view, ColorMode::Rgba, 1, 1, pack_rgba(255, 0, 0, 255)).unwrap();
        }
        assert_eq!(&memory[20..24], &[0xFF, 0xFF, 0x00, 0x00]);
        assert_eq!(memory[19], 0x33);
        assert_eq!(memory[24], 0x33);
    }

    #[test]
    fn test_plot_argb_layout() {
        let mut memory = vec![0u8; 64];
        {
            let mut view = FramebufferView::from_slice(&mut memory, custom_4x4()).unwrap();
            plot(&mut view, ColorMode::Argb, 0, 0, pack_rgba(1, 2, 3, 255)).unwrap();
        }
        assert_eq!(&memory[0..4], &[1, 2, 3, 255]);
    }

    #[test]
    fn test_plot_rgb_ignores_source_alpha_and_fourth_byte() {
        let mut memory = vec![0xEEu8; 64];
        {
            let mut view = FramebufferView::from_slice(&mut memory, custom_4x4()).unwrap();
            // pack_rgb leaves the alpha byte at zero; Rgb mode still draws it
            plot(&mut view, ColorMode::Rgb, 0, 0, 0x00FF_0000).unwrap();
        }
        assert_eq!(&memory[0..4], &[0xFF, 0x00, 0x00, 0xEE]);
    }

    #[test]
    fn test_plot_rgb_on_24bpp_surface() {
        let mut memory = vec![0u8; 36];
        let raw = RawFramebuffer::packed24(FramebufferKind::Limine, 0, 4, 3, 12);
        {
            let mut view = FramebufferView::from_slice(&mut memory, raw).unwrap();
            plot(&mut view, ColorMode::Rgb, 3, 2, 0x0010_2030).unwrap();
        }
        assert_eq!(&memory[33..36], &[0x10, 0x20, 0x30]);
    }

    #[test]
    fn test_plot_window_past_extent() {
        // 32-bit writes at the last pixel of a tightly packed 24-bit surface
        let mut memory = vec![0u8; 12];
        let raw = RawFramebuffer::packed24(FramebufferKind::FglibCustom, 0, 4, 1, 12);
        let mut view = FramebufferView::from_slice(&mut memory, raw).unwrap();
        assert!(matches!(
            plot(&mut view, ColorMode::Rgba, 3, 0, pack_rgba(1, 1, 1, 255)),
            Err(Error::OutOfBounds { x: 3, y: 0, .. })
        ));
        assert!(plot(&mut view, ColorMode::Rgba, 2, 0, pack_rgba(1, 1, 1, 255)).is_ok());
    }
}
