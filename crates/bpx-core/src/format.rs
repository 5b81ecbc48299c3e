//! Pixel formats
//!
//! A [`PixelFormat`] is a tag naming one of 24 binary layouts. Every
//! property of a layout (bytes per pixel, channel count, channel order and
//! per-channel encoding) lives in a single [`FormatDescriptor`] table;
//! the codec in [`crate::codec`] is driven entirely by that table.
//!
//! # Layouts
//!
//! | Family | Bytes | Channels | Encoding |
//! |--------|-------|----------|----------|
//! | `L*`   | 1/2/4 | 1 | u8 / binary16 / f32 luminance |
//! | `La*`  | 2/4/8 | 2 | luminance + alpha |
//! | `*565` | 2 | 3 | `hi << 11 \| g << 5 \| lo` |
//! | `*5551`| 2 | 4 | `hi << 11 \| g << 6 \| lo << 1 \| a` |
//! | `*4444`| 2 | 4 | `hi << 12 \| g << 8 \| lo << 4 \| a` |
//! | `Rgb*` / `Bgr*` | 3/6/12 | 3 | u8 / binary16 / f32 |
//! | `Rgba*` / `Bgra*` | 4/8/16 | 4 | u8 / binary16 / f32 |
//!
//! For packed layouts `hi` is red and `lo` is blue in RGB order, and the
//! other way round in BGR order. Multi-byte words use native byte order.

use std::fmt;

use self::ChannelEncoding as E;
use self::ChannelOrder as O;

/// Order of the color channels in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelOrder {
    /// Red first (or in the high bits of a packed word)
    Rgb,
    /// Blue first (or in the high bits of a packed word)
    Bgr,
}

/// Storage of a single channel, or of the whole pixel for packed layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelEncoding {
    /// One byte per channel
    U8,
    /// IEEE-754 binary16 per channel, `[0.0, 1.0]`
    F16,
    /// IEEE-754 binary32 per channel, `[0.0, 1.0]`
    F32,
    /// 16-bit word, 5/6/5 bits
    Packed565,
    /// 16-bit word, 5/5/5 bits plus a 1-bit alpha
    Packed5551,
    /// 16-bit word, 4 bits per channel
    Packed4444,
}

impl ChannelEncoding {
    /// Size in bytes of one channel, or of the whole word for packed layouts.
    pub const fn size(self) -> usize {
        match self {
            ChannelEncoding::U8 => 1,
            ChannelEncoding::F16 => 2,
            ChannelEncoding::F32 => 4,
            ChannelEncoding::Packed565
            | ChannelEncoding::Packed5551
            | ChannelEncoding::Packed4444 => 2,
        }
    }

    /// Whether all channels share one packed word.
    pub const fn is_packed(self) -> bool {
        matches!(
            self,
            ChannelEncoding::Packed565 | ChannelEncoding::Packed5551 | ChannelEncoding::Packed4444
        )
    }
}

/// Immutable description of a pixel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDescriptor {
    pub bytes_per_pixel: usize,
    pub channels: u8,
    pub order: ChannelOrder,
    pub encoding: ChannelEncoding,
}

impl FormatDescriptor {
    const fn new(channels: u8, order: ChannelOrder, encoding: ChannelEncoding) -> Self {
        let bytes_per_pixel = if encoding.is_packed() {
            encoding.size()
        } else {
            channels as usize * encoding.size()
        };
        FormatDescriptor {
            bytes_per_pixel,
            channels,
            order,
            encoding,
        }
    }
}

/// Pixel format tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    LU8,
    LF16,
    LF32,
    LaU8,
    LaF16,
    LaF32,
    Rgb565,
    Bgr565,
    RgbU8,
    BgrU8,
    RgbF16,
    BgrF16,
    RgbF32,
    BgrF32,
    Rgba5551,
    Bgra5551,
    Rgba4444,
    Bgra4444,
    #[default]
    RgbaU8,
    BgraU8,
    RgbaF16,
    BgraF16,
    RgbaF32,
    BgraF32,
}

/// Descriptor table, indexed by the `PixelFormat` discriminant.
const DESCRIPTORS: [FormatDescriptor; 24] = [
    FormatDescriptor::new(1, O::Rgb, E::U8),
    FormatDescriptor::new(1, O::Rgb, E::F16),
    FormatDescriptor::new(1, O::Rgb, E::F32),
    FormatDescriptor::new(2, O::Rgb, E::U8),
    FormatDescriptor::new(2, O::Rgb, E::F16),
    FormatDescriptor::new(2, O::Rgb, E::F32),
    FormatDescriptor::new(3, O::Rgb, E::Packed565),
    FormatDescriptor::new(3, O::Bgr, E::Packed565),
    FormatDescriptor::new(3, O::Rgb, E::U8),
    FormatDescriptor::new(3, O::Bgr, E::U8),
    FormatDescriptor::new(3, O::Rgb, E::F16),
    FormatDescriptor::new(3, O::Bgr, E::F16),
    FormatDescriptor::new(3, O::Rgb, E::F32),
    FormatDescriptor::new(3, O::Bgr, E::F32),
    FormatDescriptor::new(4, O::Rgb, E::Packed5551),
    FormatDescriptor::new(4, O::Bgr, E::Packed5551),
    FormatDescriptor::new(4, O::Rgb, E::Packed4444),
    FormatDescriptor::new(4, O::Bgr, E::Packed4444),
    FormatDescriptor::new(4, O::Rgb, E::U8),
    FormatDescriptor::new(4, O::Bgr, E::U8),
    FormatDescriptor::new(4, O::Rgb, E::F16),
    FormatDescriptor::new(4, O::Bgr, E::F16),
    FormatDescriptor::new(4, O::Rgb, E::F32),
    FormatDescriptor::new(4, O::Bgr, E::F32),
];

impl PixelFormat {
    /// Every format, in declaration order.
    pub const ALL: [PixelFormat; 24] = [
        PixelFormat::LU8,
        PixelFormat::LF16,
        PixelFormat::LF32,
        PixelFormat::LaU8,
        PixelFormat::LaF16,
        PixelFormat::LaF32,
        PixelFormat::Rgb565,
        PixelFormat::Bgr565,
        PixelFormat::RgbU8,
        PixelFormat::BgrU8,
        PixelFormat::RgbF16,
        PixelFormat::BgrF16,
        PixelFormat::RgbF32,
        PixelFormat::BgrF32,
        PixelFormat::Rgba5551,
        PixelFormat::Bgra5551,
        PixelFormat::Rgba4444,
        PixelFormat::Bgra4444,
        PixelFormat::RgbaU8,
        PixelFormat::BgraU8,
        PixelFormat::RgbaF16,
        PixelFormat::BgraF16,
        PixelFormat::RgbaF32,
        PixelFormat::BgraF32,
    ];

    /// Layout descriptor of this format.
    #[inline]
    pub const fn descriptor(self) -> FormatDescriptor {
        DESCRIPTORS[self as usize]
    }

    /// Bytes used by one pixel.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        self.descriptor().bytes_per_pixel
    }

    /// Number of channels (1 to 4).
    #[inline]
    pub const fn channel_count(self) -> u8 {
        self.descriptor().channels
    }

    /// Channel order.
    #[inline]
    pub const fn order(self) -> ChannelOrder {
        self.descriptor().order
    }

    /// Channel encoding.
    #[inline]
    pub const fn encoding(self) -> ChannelEncoding {
        self.descriptor().encoding
    }

    /// Whether the format stores an alpha channel.
    pub const fn has_alpha(self) -> bool {
        matches!(self.channel_count(), 2 | 4)
    }

    /// Whether channels are stored as floats (binary16 or binary32).
    pub const fn is_float(self) -> bool {
        matches!(self.encoding(), ChannelEncoding::F16 | ChannelEncoding::F32)
    }

    /// Whether all channels share one packed 16-bit word.
    pub const fn is_packed(self) -> bool {
        self.encoding().is_packed()
    }

    /// The non-packed 8-bit format for a channel count in `1..=4`.
    ///
    /// Returns `None` for any other channel count.
    pub const fn from_channels_u8(channels: u8) -> Option<PixelFormat> {
        match channels {
            1 => Some(PixelFormat::LU8),
            2 => Some(PixelFormat::LaU8),
            3 => Some(PixelFormat::RgbU8),
            4 => Some(PixelFormat::RgbaU8),
            _ => None,
        }
    }

    /// Conventional upper-case name, e.g. `RGBA_U8`.
    pub const fn name(self) -> &'static str {
        match self {
            PixelFormat::LU8 => "L_U8",
            PixelFormat::LF16 => "L_F16",
            PixelFormat::LF32 => "L_F32",
            PixelFormat::LaU8 => "LA_U8",
            PixelFormat::LaF16 => "LA_F16",
            PixelFormat::LaF32 => "LA_F32",
            PixelFormat::Rgb565 => "RGB_565",
            PixelFormat::Bgr565 => "BGR_565",
            PixelFormat::RgbU8 => "RGB_U8",
            PixelFormat::BgrU8 => "BGR_U8",
            PixelFormat::RgbF16 => "RGB_F16",
            PixelFormat::BgrF16 => "BGR_F16",
            PixelFormat::RgbF32 => "RGB_F32",
            PixelFormat::BgrF32 => "BGR_F32",
            PixelFormat::Rgba5551 => "RGBA_5551",
            PixelFormat::Bgra5551 => "BGRA_5551",
            PixelFormat::Rgba4444 => "RGBA_4444",
            PixelFormat::Bgra4444 => "BGRA_4444",
            PixelFormat::RgbaU8 => "RGBA_U8",
            PixelFormat::BgraU8 => "BGRA_U8",
            PixelFormat::RgbaF16 => "RGBA_F16",
            PixelFormat::BgraF16 => "BGRA_F16",
            PixelFormat::RgbaF32 => "RGBA_F32",
            PixelFormat::BgraF32 => "BGRA_F32",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
