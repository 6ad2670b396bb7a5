//! # Bitmap Fonts
//!
//! Fixed-cell bitmap fonts with optional proportional spacing.
//!
//! ## Glyph Format
//!
//! Glyphs are stored back to back. Each glyph is `height` rows of
//! `ceil(width / 8)` bytes, most significant bit first:
//!
//! ```text
//! width = 5, height = 3, one byte per row
//!   0b0111_0000   .###.
//!   0b1000_1000   #...#
//!   0b1111_1000   #####
//! ```
//!
//! The glyph for code point `c` is at index `c - ascii_offset`. Codes below
//! the offset, or past the last stored glyph, have no glyph and are skipped.
//!
//! ## Proportional Spacing
//!
//! A proportional font advances by the glyph's *ink width*: the column just
//! past its rightmost set bit across all rows. Monospace fonts always advance
//! by the cell width. See [`layout`] for the cursor rules.

pub mod layout;

pub use layout::{GlyphPlacement, TextLayout, ESCAPE};

/// Statically provided bitmap font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font<'a> {
    monospace: bool,
    width: u8,
    height: u8,
    ascii_offset: u8,
    glyphs: &'a [u8],
}

impl<'a> Font<'a> {
    pub const fn new(
        monospace: bool,
        width: u8,
        height: u8,
        ascii_offset: u8,
        glyphs: &'a [u8],
    ) -> Self {
        Self {
            monospace,
            width,
            height,
            ascii_offset,
            glyphs,
        }
    }

    #[inline]
    pub const fn monospace(&self) -> bool {
        self.monospace
    }

    #[inline]
    pub const fn width(&self) -> u8 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub const fn ascii_offset(&self) -> u8 {
        self.ascii_offset
    }

    #[inline]
    pub const fn bytes_per_row(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// Bytes used by one glyph.
    #[inline]
    pub const fn glyph_size(&self) -> usize {
        self.bytes_per_row() * self.height as usize
    }

    /// Number of complete glyphs in the glyph table.
    pub fn glyph_count(&self) -> usize {
        match self.glyph_size() {
            0 => 0,
            size => self.glyphs.len() / size,
        }
    }

    /// Packed bitmap of `code`, if the font has one.
    pub fn glyph(&self, code: u8) -> Option<&'a [u8]> {
        let index = code.checked_sub(self.ascii_offset)? as usize;
        if index >= self.glyph_count() {
            return None;
        }
        let size = self.glyph_size();
        self.glyphs.get(index * size..(index + 1) * size)
    }

    /// Horizontal extent covered by set bits, `None` without a glyph.
    pub fn ink_width(&self, code: u8) -> Option<u8> {
        self.glyph(code).map(|glyph| ink_width(glyph, self.bytes_per_row()))
    }

    /// Width the layout uses for `code`: the cell for monospace fonts, the
    /// ink width otherwise.
    pub fn char_width(&self, code: u8) -> Option<u8> {
        if self.monospace {
            self.glyph(code).map(|_| self.width)
        } else {
            self.ink_width(code)
        }
    }

    /// Lay out `text` starting at the origin.
    pub fn layout<'t>(&self, text: &'t [u8]) -> TextLayout<'a, 't> {
        TextLayout::new(*self, text)
    }

    /// Size of the box covering every drawn glyph of `text`, `(width, height)`.
    pub fn measure(&self, text: &[u8]) -> (u32, u32) {
        let mut right = 0i32;
        let mut bottom = 0i32;
        for placement in self.layout(text) {
            right = right.max(placement.x + placement.width as i32);
            bottom = bottom.max(placement.y + self.height as i32);
        }
        (right.max(0) as u32, bottom.max(0) as u32)
    }
}

/// Column past the rightmost set bit over all rows of `glyph`.
fn ink_width(glyph: &[u8], bytes_per_row: usize) -> u8 {
    if bytes_per_row == 0 {
        return 0;
    }

    let mut columns = [0u8; 32];
    let columns = &mut columns[..bytes_per_row];
    for row in glyph.chunks_exact(bytes_per_row) {
        for (acc, byte) in columns.iter_mut().zip(row) {
            *acc |= byte;
        }
    }

    columns
        .iter()
        .enumerate()
        .rev()
        .find(|(_, bits)| **bits != 0)
        .map(|(b, bits)| (8 * b + 8 - bits.trailing_zeros() as usize) as u8)
        .unwrap_or(0)
}
