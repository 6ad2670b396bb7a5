//! Bitmap blits
use super::Canvas;
use crate::error::{Error, Result};
use crate::framebuffer::Color;

impl Canvas<'_> {
    /// Blit a 1-bit bitmap: set bits plot `color`, clear bits leave the
    /// background alone. Rows are `ceil(width / 8)` bytes, MSB first.
    pub fn bitmap_mono(
        &mut self,
        x: i32,
        y: i32,
        bitmap: &[u8],
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<()> {
        let row_bytes = (width as usize).div_ceil(8);
        if bitmap.len() < row_bytes * height as usize {
            return Err(Error::InvalidArgument);
        }

        let Some((first, last)) = self.visible_rows(y, height) else {
            return Ok(());
        };
        for v in first..=last {
            let row = &bitmap[v * row_bytes..(v + 1) * row_bytes];
            for u in 0..width as usize {
                if row[u >> 3] & (0x80 >> (u & 7)) != 0 {
                    self.plot(x, y, u, v, color);
                }
            }
        }
        Ok(())
    }

    /// Blit one byte-per-pixel palette-indexed bitmap. Indices past the end
    /// of the palette are skipped.
    pub fn bitmap_palette(
        &mut self,
        x: i32,
        y: i32,
        indices: &[u8],
        width: u32,
        height: u32,
        palette: &[Color],
    ) -> Result<()> {
        self.blit_indexed(x, y, indices, width, height, palette, None)
    }

    /// Like [`Canvas::bitmap_palette`], leaving pixels with index
    /// `transparent` untouched.
    #[allow(clippy::too_many_arguments)]
    pub fn bitmap_palette_transparent(
        &mut self,
        x: i32,
        y: i32,
        indices: &[u8],
        width: u32,
        height: u32,
        palette: &[Color],
        transparent: u8,
    ) -> Result<()> {
        self.blit_indexed(x, y, indices, width, height, palette, Some(transparent))
    }

    #[allow(clippy::too_many_arguments)]
    fn blit_indexed(
        &mut self,
        x: i32,
        y: i32,
        indices: &[u8],
        width: u32,
        height: u32,
        palette: &[Color],
        transparent: Option<u8>,
    ) -> Result<()> {
        let width = width as usize;
        if indices.len() < width * height as usize {
            return Err(Error::InvalidArgument);
        }

        let Some((first, last)) = self.visible_rows(y, height) else {
            return Ok(());
        };
        for v in first..=last {
            let row = &indices[v * width..(v + 1) * width];
            for (u, &index) in row.iter().enumerate() {
                if Some(index) == transparent {
                    continue;
                }
                if let Some(&color) = palette.get(index as usize) {
                    self.plot(x, y, u, v, color);
                }
            }
        }
        Ok(())
    }

    /// Bitmap rows (relative to `y`) that overlap the active window.
    fn visible_rows(&self, y: i32, height: u32) -> Option<(usize, usize)> {
        let region = self.window.region();
        let first = (region.y0 as i64 - y as i64).max(0);
        let last = (region.y1 as i64 - y as i64).min(height as i64 - 1);
        (first <= last).then_some((first as usize, last as usize))
    }

    /// Pixel `(u, v)` of a bitmap placed at `(x, y)`.
    #[inline]
    fn plot(&mut self, x: i32, y: i32, u: usize, v: usize, color: Color) {
        let px = i32::try_from(x as i64 + u as i64);
        let py = i32::try_from(y as i64 + v as i64);
        if let (Ok(px), Ok(py)) = (px, py) {
            self.window.set_pixel(px, py, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::tests::window;
    use crate::geometry::Region;
    use embedded_graphics_core::geometry::Size;

    #[test]
    fn mono_bits_are_msb_first_and_transparent() {
        let mut w = window(Region::new(0, 0, 11, 1));
        w.fill_region(&Region::new(0, 0, 11, 1), Color::BLUE);
        let mut canvas = Canvas::new(&mut w, Size::new(12, 2));
        // 10 px wide: two bytes per row
        let bitmap = [0b1000_0001, 0b0100_0000, 0b0000_0000, 0b1000_0000];
        canvas.bitmap_mono(1, 0, &bitmap, 10, 2, Color::RED).unwrap();

        assert_eq!(w.pixel(1, 0), Some(Color::RED));
        assert_eq!(w.pixel(8, 0), Some(Color::RED));
        assert_eq!(w.pixel(10, 0), Some(Color::RED));
        assert_eq!(w.pixel(2, 0), Some(Color::BLUE));
        assert_eq!(w.pixel(9, 1), Some(Color::RED));
        assert_eq!(w.pixel(1, 1), Some(Color::BLUE));
    }

    #[test]
    fn short_bitmap_is_invalid() {
        let mut w = window(Region::new(0, 0, 7, 7));
        let mut canvas = Canvas::new(&mut w, Size::new(8, 8));
        assert_eq!(
            canvas.bitmap_mono(0, 0, &[0xFF], 8, 2, Color::RED),
            Err(Error::InvalidArgument)
        );
        assert_eq!(
            canvas.bitmap_palette(0, 0, &[0, 1, 2], 2, 2, &[Color::RED]),
            Err(Error::InvalidArgument)
        );
    }

    #[test]
    fn palette_blit_skips_transparent_and_unknown_indices() {
        let mut w = window(Region::new(0, 0, 3, 0));
        let mut canvas = Canvas::new(&mut w, Size::new(4, 1));
        let palette = [Color::RED, Color::GREEN, Color::BLUE];
        canvas
            .bitmap_palette_transparent(0, 0, &[0, 1, 2, 9], 4, 1, &palette, 1)
            .unwrap();
        assert_eq!(w.pixels(), [Color::RED, Color::BLACK, Color::BLUE, Color::BLACK]);
    }

    #[test]
    fn blit_rows_outside_window_are_skipped() {
        let mut w = window(Region::new(0, 5, 1, 5));
        let mut canvas = Canvas::new(&mut w, Size::new(2, 10));
        let palette = [Color::RED, Color::GREEN];
        canvas
            .bitmap_palette(0, 4, &[0, 0, 1, 1, 0, 0], 2, 3, &palette)
            .unwrap();
        assert_eq!(w.pixels(), [Color::GREEN, Color::GREEN]);
    }

    #[test]
    fn bitmaps_at_extreme_offsets_clip_silently() {
        let mut w = window(Region::new(0, 0, 3, 3));
        let mut canvas = Canvas::new(&mut w, Size::new(4, 4));
        let bitmap = [0xFF; 4];
        canvas.bitmap_mono(i32::MAX - 3, 0, &bitmap, 8, 4, Color::RED).unwrap();
        canvas.bitmap_mono(0, i32::MIN, &bitmap, 8, 4, Color::RED).unwrap();
        canvas.bitmap_mono(-4, i32::MAX - 1, &bitmap, 8, 4, Color::RED).unwrap();
        assert!(w.pixels().iter().all(|&c| c == Color::BLACK));
    }
}
