//! Text layout state machine
//!
//! A single left-to-right pass over a byte string that yields one
//! [`GlyphPlacement`] per drawable glyph.
//!
//! | Byte           | Effect                                                   |
//! |----------------|----------------------------------------------------------|
//! | `\n`           | pen to column 0, down by `height + 1`                    |
//! | `0x1B`         | pen back by the previous glyph's advance, combining mode |
//! | space          | advance by `width / 4` plus the gap, leave combining     |
//! | `< ascii_offset` | ignored                                                |
//! | other          | place glyph, advance by its width plus the gap           |
//!
//! The gap between glyphs is 1 pixel for proportional fonts and 0 for
//! monospace ones. In combining mode a proportional glyph is centered over
//! the previous one, which is how a diacritic lands on its base letter.

use super::Font;

/// Marker byte that makes the next glyph overlap the previous one.
pub const ESCAPE: u8 = 0x1B;

const LINE_GAP: i32 = 1;

/// Where one glyph goes, relative to the layout origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphPlacement {
    pub code: u8,
    pub x: i32,
    pub y: i32,
    pub width: u8,
}

pub struct TextLayout<'a, 't> {
    font: Font<'a>,
    text: core::slice::Iter<'t, u8>,
    cx: i32,
    cy: i32,
    last_char_width: i32,
    combining: bool,
}

impl<'a, 't> TextLayout<'a, 't> {
    pub fn new(font: Font<'a>, text: &'t [u8]) -> Self {
        Self {
            font,
            text: text.iter(),
            cx: 0,
            cy: 0,
            last_char_width: 0,
            combining: false,
        }
    }

    /// Current pen position relative to the origin.
    pub fn cursor(&self) -> (i32, i32) {
        (self.cx, self.cy)
    }

    pub fn combining(&self) -> bool {
        self.combining
    }

    fn char_gap(&self) -> i32 {
        if self.font.monospace() {
            0
        } else {
            1
        }
    }

    fn empty_gap(&self) -> i32 {
        self.font.width() as i32 / 4
    }

    fn place(&mut self, code: u8) -> Option<GlyphPlacement> {
        let char_width = self.font.char_width(code)? as i32;

        let mut x = self.cx;
        if self.combining && !self.font.monospace() {
            x += (self.last_char_width - char_width + 1) / 2;
        } else {
            self.last_char_width = if char_width == 0 {
                self.empty_gap()
            } else {
                char_width
            };
        }

        self.combining = false;
        self.cx += self.last_char_width + self.char_gap();

        (char_width > 0).then_some(GlyphPlacement {
            code,
            x,
            y: self.cy,
            width: char_width as u8,
        })
    }
}

impl Iterator for TextLayout<'_, '_> {
    type Item = GlyphPlacement;

    fn next(&mut self) -> Option<GlyphPlacement> {
        loop {
            let code = *self.text.next()?;
            match code {
                ESCAPE => {
                    self.cx -= self.last_char_width + self.char_gap();
                    self.combining = true;
                }
                b'\n' => {
                    self.last_char_width = 0;
                    self.cx = 0;
                    self.cy += self.font.height() as i32 + LINE_GAP;
                }
                b' ' => {
                    self.combining = false;
                    self.last_char_width = self.empty_gap();
                    self.cx += self.last_char_width + self.char_gap();
                }
                code if code < self.font.ascii_offset() => {}
                code => {
                    if let Some(placement) = self.place(code) {
                        return Some(placement);
                    }
                }
            }
        }
    }
}
