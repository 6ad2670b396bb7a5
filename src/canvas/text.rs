//! Text drawing
use super::Canvas;
use crate::error::{Error, Result};
use crate::font::Font;
use crate::framebuffer::Color;

impl<'a> Canvas<'a> {
    fn configured_font(&self) -> Result<Font<'a>> {
        self.font.ok_or(Error::InvalidArgument)
    }

    /// Draw one glyph of the display font with its cell's top-left at `(x, y)`.
    ///
    /// Codes without a glyph draw nothing.
    pub fn draw_char(&mut self, x: i32, y: i32, code: u8, color: Color) -> Result<()> {
        let font = self.configured_font()?;
        self.draw_char_with(&font, x, y, code, color)
    }

    /// Draw `text` in the display font starting at `(x, y)`.
    ///
    /// `text` is a byte string: codes above 0x7F address extra glyphs of the
    /// font and [`ESCAPE`](crate::font::ESCAPE) combines the next glyph with
    /// the previous one. Fails with [`Error::InvalidArgument`] when the
    /// display has no font.
    pub fn draw_string(&mut self, x: i32, y: i32, text: &[u8], color: Color) -> Result<()> {
        let font = self.configured_font()?;
        self.draw_text(&font, x, y, text, color)
    }

    pub fn draw_char_with(&mut self, font: &Font<'_>, x: i32, y: i32, code: u8, color: Color) -> Result<()> {
        match font.glyph(code) {
            Some(glyph) => self.bitmap_mono(x, y, glyph, font.width() as u32, font.height() as u32, color),
            None => Ok(()),
        }
    }

    /// Draw `text` with an explicit font.
    pub fn draw_text(&mut self, font: &Font<'_>, x: i32, y: i32, text: &[u8], color: Color) -> Result<()> {
        let region = self.window.region();
        let height = font.height() as i32;

        for glyph in font.layout(text) {
            let gy = y.saturating_add(glyph.y);
            if gy > region.y1 || gy.saturating_add(height) <= region.y0 {
                continue;
            }
            self.draw_char_with(font, x.saturating_add(glyph.x), gy, glyph.code, color)?;
        }
        Ok(())
    }
}
