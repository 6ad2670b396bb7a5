//! EBG container layout
//!
//! | Offset | Size            | Field                                       |
//! |--------|-----------------|---------------------------------------------|
//! | 0      | 3               | `"EBG"`                                     |
//! | 3      | 1               | version, `0x01`                             |
//! | 4      | 2               | width, little endian                        |
//! | 6      | 2               | height, little endian                       |
//! | 8      | 1               | flags                                       |
//! | 9      | 1               | palette entries minus one                   |
//! | 10     | 1               | transparent index                           |
//! | 11     | 1               | frame count                                 |
//! | 12     | 2 * entries     | palette, RGB565 big endian (indexed only)   |
//! | ...    | width * height  | frame 1, then frame 2, ...                  |
//!
//! Flags: bit 7 transparent, bits 6-4 color mode, bit 3 indexed, bit 2
//! index size.

use crate::error::{Error, Result};
use core::fmt;

pub const SIGNATURE: [u8; 3] = *b"EBG";
pub const VERSION: u8 = 0x01;
pub const SIGNATURE_SIZE: usize = 4;
pub const HEADER_SIZE: usize = 8;
/// Offset of the palette (or of frame 1 for non-indexed images).
pub const PALETTE_OFFSET: usize = SIGNATURE_SIZE + HEADER_SIZE;

const FLAG_TRANSPARENT: u8 = 0b1000_0000;
const FLAG_COLORMODE: u8 = 0b0111_0000;
const FLAG_INDEXED: u8 = 0b0000_1000;
const FLAG_INDEXSIZE: u8 = 0b0000_0100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Mono,
    Gray,
    Rgb565,
    Rgb888,
    Rgba5658,
    Rgba8888,
    Unknown(u8),
}

impl ColorMode {
    const fn from_bits(bits: u8) -> Self {
        match (bits & FLAG_COLORMODE) >> 4 {
            0 => ColorMode::Mono,
            1 => ColorMode::Gray,
            2 => ColorMode::Rgb565,
            3 => ColorMode::Rgb888,
            4 => ColorMode::Rgba5658,
            5 => ColorMode::Rgba8888,
            other => ColorMode::Unknown(other),
        }
    }

    const fn bits(self) -> u8 {
        let mode = match self {
            ColorMode::Mono => 0,
            ColorMode::Gray => 1,
            ColorMode::Rgb565 => 2,
            ColorMode::Rgb888 => 3,
            ColorMode::Rgba5658 => 4,
            ColorMode::Rgba8888 => 5,
            ColorMode::Unknown(other) => other,
        };
        (mode << 4) & FLAG_COLORMODE
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Mono => write!(f, "MONO"),
            ColorMode::Gray => write!(f, "GRAY"),
            ColorMode::Rgb565 => write!(f, "RGB565"),
            ColorMode::Rgb888 => write!(f, "RGB888"),
            ColorMode::Rgba5658 => write!(f, "RGBA5658"),
            ColorMode::Rgba8888 => write!(f, "RGBA8888"),
            ColorMode::Unknown(_) => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSize {
    Bit,
    Byte,
}

impl fmt::Display for IndexSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexSize::Bit => write!(f, "BIT"),
            IndexSize::Byte => write!(f, "BYTE"),
        }
    }
}

/// The header flag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageFlags(u8);

impl ImageFlags {
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn new(colormode: ColorMode, indexed: bool, index_size: IndexSize, transparent: bool) -> Self {
        let mut bits = colormode.bits();
        if indexed {
            bits |= FLAG_INDEXED;
        }
        if let IndexSize::Byte = index_size {
            bits |= FLAG_INDEXSIZE;
        }
        if transparent {
            bits |= FLAG_TRANSPARENT;
        }
        Self(bits)
    }

    pub const fn transparent(self) -> bool {
        self.0 & FLAG_TRANSPARENT != 0
    }

    pub const fn colormode(self) -> ColorMode {
        ColorMode::from_bits(self.0)
    }

    pub const fn indexed(self) -> bool {
        self.0 & FLAG_INDEXED != 0
    }

    pub const fn index_size(self) -> IndexSize {
        if self.0 & FLAG_INDEXSIZE != 0 {
            IndexSize::Byte
        } else {
            IndexSize::Bit
        }
    }
}

/// Fixed-size header following the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u16,
    pub height: u16,
    pub flags: ImageFlags,
    /// Palette entries minus one.
    pub palette_size: u8,
    pub transparent_index: u8,
    pub frame_count: u8,
}

impl ImageHeader {
    pub fn parse(bytes: &[u8; HEADER_SIZE]) -> Self {
        Self {
            width: u16::from_le_bytes([bytes[0], bytes[1]]),
            height: u16::from_le_bytes([bytes[2], bytes[3]]),
            flags: ImageFlags::from_bits(bytes[4]),
            palette_size: bytes[5],
            transparent_index: bytes[6],
            frame_count: bytes[7],
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let [w0, w1] = self.width.to_le_bytes();
        let [h0, h1] = self.height.to_le_bytes();
        [
            w0,
            w1,
            h0,
            h1,
            self.flags.bits(),
            self.palette_size,
            self.transparent_index,
            self.frame_count,
        ]
    }

    /// Palette entries stored in the file.
    pub fn palette_len(&self) -> usize {
        if self.flags.indexed() {
            self.palette_size as usize + 1
        } else {
            0
        }
    }

    /// Bytes per frame.
    pub fn frame_size(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Offset of frame 1.
    pub fn data_offset(&self) -> usize {
        PALETTE_OFFSET + 2 * self.palette_len()
    }
}

/// Check the 4-byte signature and version.
pub fn check_signature(bytes: &[u8; SIGNATURE_SIZE]) -> Result<()> {
    if bytes[..3] != SIGNATURE || bytes[3] != VERSION {
        return Err(Error::InvalidFormat);
    }
    Ok(())
}
