//! # Pixel Codec
//!
//! Packing and unpacking of 8-bit channels into a 32-bit color word.
//!
//! Every packer produces the same layout, `(a << 24) | (r << 16) | (g << 8) | b`.
//! [`pack_argb`] differs from [`pack_rgba`] only in argument order. How the
//! word is laid out in framebuffer memory is decided by [`ColorMode`] at
//! write time, not at packing time.

/// Pack an RGB color (alpha byte is zero)
pub const fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Pack an RGBA color
pub const fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Pack an ARGB color (same bit layout as [`pack_rgba`])
pub const fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    pack_rgba(r, g, b, a)
}

/// Split a packed color into its channels
pub const fn unpack(color: u32) -> Channels {
    Channels::unpack(color)
}

/// Individual 8-bit color channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Channels {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0-255)
    pub a: u8,
}

impl Channels {
    /// Create channels from components
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque channels
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Split a packed color
    pub const fn unpack(color: u32) -> Self {
        Self {
            r: (color >> 16) as u8,
            g: (color >> 8) as u8,
            b: color as u8,
            a: (color >> 24) as u8,
        }
    }

    /// Pack back into a color word
    pub const fn pack(self) -> u32 {
        pack_rgba(self.r, self.g, self.b, self.a)
    }
}

impl From<u32> for Channels {
    fn from(color: u32) -> Self {
        Self::unpack(color)
    }
}

impl From<Channels> for u32 {
    fn from(channels: Channels) -> Self {
        channels.pack()
    }
}

/// Color mode: channel order in memory and alpha presence
///
/// | Mode   | Bytes in memory      |
/// |--------|----------------------|
/// | `Rgb`  | `R G B`              |
/// | `Rgba` | `A R G B`            |
/// | `Argb` | `R G B A`            |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum ColorMode {
    /// Three bytes, no stored alpha
    Rgb = 0x01,
    /// Four bytes, alpha first
    #[default]
    Rgba = 0x02,
    /// Four bytes, alpha last
    Argb = 0x03,
}

impl ColorMode {
    /// Decode a raw color mode tag
    pub const fn from_raw(value: u32) -> Option<Self> {
        match value {
            0x01 => Some(Self::Rgb),
            0x02 => Some(Self::Rgba),
            0x03 => Some(Self::Argb),
            _ => None,
        }
    }

    /// Bytes written per pixel in this mode
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba | Self::Argb => 4,
        }
    }

    /// Whether an alpha byte is stored
    pub const fn has_alpha(self) -> bool {
        !matches!(self, Self::Rgb)
    }

    /// Decode pixel bytes laid out in this mode
    ///
    /// `bytes` must hold at least [`Self::bytes_per_pixel`] entries. Modes
    /// without stored alpha read back as fully opaque.
    pub fn read(self, bytes: &[u8]) -> Channels {
        match self {
            Self::Rgb => Channels::opaque(bytes[0], bytes[1], bytes[2]),
            Self::Rgba => Channels::new(bytes[1], bytes[2], bytes[3], bytes[0]),
            Self::Argb => Channels::new(bytes[0], bytes[1], bytes[2], bytes[3]),
        }
    }

    /// Encode channels into pixel bytes laid out in this mode
    ///
    /// Only the first [`Self::bytes_per_pixel`] entries of `bytes` are touched.
    pub fn write(self, channels: Channels, bytes: &mut [u8]) {
        match self {
            Self::Rgb => {
                bytes[0] = channels.r;
                bytes[1] = channels.g;
                bytes[2] = channels.b;
            }
            Self::Rgba => {
                bytes[0] = channels.a;
                bytes[1] = channels.r;
                bytes[2] = channels.g;
                bytes[3] = channels.b;
            }
            Self::Argb => {
                bytes[0] = channels.r;
                bytes[1] = channels.g;
                bytes[2] = channels.b;
                bytes[3] = channels.a;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_rgb() {
        assert_eq!(pack_rgb(255, 0, 0), 0x00FF_0000);
        assert_eq!(pack_rgb(0x12, 0x34, 0x56), 0x0012_3456);
    }

    #[test]
    fn test_rgba_and_argb_share_layout() {
        assert_eq!(pack_rgba(255, 0, 0, 128), 0x80FF_0000);
        assert_eq!(pack_argb(128, 255, 0, 0), 0x80FF_0000);
        assert_eq!(pack_rgba(1, 2, 3, 4), pack_argb(4, 1, 2, 3));
    }

    #[test]
    fn test_unpack() {
        let c = unpack(0x80FF_1020);
        assert_eq!(c, Channels::new(0xFF, 0x10, 0x20, 0x80));
        assert_eq!(c.pack(), 0x80FF_1020);
    }

    #[test]
    fn test_mode_byte_layouts() {
        let c = Channels::new(0x11, 0x22, 0x33, 0x44);
        let mut bytes = [0u8; 4];

        ColorMode::Rgba.write(c, &mut bytes);
        assert_eq!(bytes, [0x44, 0x11, 0x22, 0x33]);
        assert_eq!(ColorMode::Rgba.read(&bytes), c);

        ColorMode::Argb.write(c, &mut bytes);
        assert_eq!(bytes, [0x11, 0x22, 0x33, 0x44]);
        assert_eq!(ColorMode::Argb.read(&bytes), c);
    }

    #[test]
    fn test_rgb_mode_leaves_fourth_byte() {
        let mut bytes = [0xAA; 4];
        ColorMode::Rgb.write(Channels::new(1, 2, 3, 0), &mut bytes);
        assert_eq!(bytes, [1, 2, 3, 0xAA]);
        assert_eq!(ColorMode::Rgb.read(&bytes).a, 255);
    }

    #[test]
    fn test_mode_tags() {
        assert_eq!(ColorMode::from_raw(0x01), Some(ColorMode::Rgb));
        assert_eq!(ColorMode::from_raw(0x03), Some(ColorMode::Argb));
        assert_eq!(ColorMode::from_raw(0x09), None);
        assert_eq!(ColorMode::default(), ColorMode::Rgba);
    }
}
