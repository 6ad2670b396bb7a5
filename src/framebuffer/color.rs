//! Color representation
//!
//! Colors are 16-bit RGB565 values kept in the byte order the display expects
//! on the wire. [`Color::from_hex`] turns a readable literal such as `0xF800`
//! (red) into that order.
use embedded_graphics_core::pixelcolor::{raw::RawU16, Rgb565};
use embedded_graphics_core::prelude::IntoStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Color(u16);

impl Color {
    pub const BLACK: Color = Color::from_hex(0x0000);
    pub const WHITE: Color = Color::from_hex(0xFFFF);
    pub const RED: Color = Color::from_hex(0xF800);
    pub const GREEN: Color = Color::from_hex(0x07E0);
    pub const BLUE: Color = Color::from_hex(0x001F);
    pub const YELLOW: Color = Color::from_hex(0xFFE0);
    pub const CYAN: Color = Color::from_hex(0x07FF);
    pub const MAGENTA: Color = Color::from_hex(0xF81F);
    pub const GRAY: Color = Color::from_hex(0x8410);

    /// Color from a readable RGB565 literal (swaps into wire order).
    pub const fn from_hex(hex: u16) -> Self {
        Self(hex.swap_bytes())
    }

    /// Color from a value that is already in wire order.
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Quantize 8-bit channels to RGB565.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let hex = ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | ((b as u16 & 0xF8) >> 3);
        Self::from_hex(hex)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn to_hex(self) -> u16 {
        self.0.swap_bytes()
    }

    /// The two bytes sent to the panel, most significant first.
    pub const fn to_bytes(self) -> [u8; 2] {
        self.to_hex().to_be_bytes()
    }

    /// Inverse of [`Color::to_bytes`].
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self::from_hex(u16::from_be_bytes(bytes))
    }
}

impl From<Rgb565> for Color {
    fn from(color: Rgb565) -> Self {
        Color::from_hex(color.into_storage())
    }
}

impl From<Color> for Rgb565 {
    fn from(color: Color) -> Self {
        Rgb565::from(RawU16::new(color.to_hex()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics_core::pixelcolor::RgbColor;

    #[test]
    fn hex_literal_is_byte_swapped() {
        assert_eq!(Color::from_hex(0xF800).raw(), 0x00F8);
        assert_eq!(Color::RED.to_hex(), 0xF800);
        assert_eq!(Color::RED.to_bytes(), [0xF8, 0x00]);
        assert_eq!(Color::from_bytes([0x07, 0xE0]), Color::GREEN);
    }

    #[test]
    fn rgb_quantization() {
        assert_eq!(Color::from_rgb(255, 0, 0), Color::RED);
        assert_eq!(Color::from_rgb(255, 255, 255), Color::WHITE);
        assert_eq!(Color::from_rgb(0, 4, 0).to_hex(), 0x0020);
    }

    #[test]
    fn rgb565_round_trip() {
        let eg: Rgb565 = Color::BLUE.into();
        assert_eq!(eg, Rgb565::BLUE);
        assert_eq!(Color::from(Rgb565::GREEN), Color::GREEN);
    }
}
