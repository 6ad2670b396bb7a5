//! Geometric primitives
//!
//! All shapes write through the window's clipped fills or [`Canvas::pixel`],
//! so nothing outside the active strip is touched.

use super::Canvas;
use crate::error::{Error, Result};
use crate::framebuffer::Color;
use crate::geometry::{saturate, span_end, Point, Region};
use log::warn;

/// Thickness value that selects the filled variant of a shape.
pub const FILLED: u32 = 0;

/// Maximum edge crossings per scanline when filling a polygon.
pub const MAX_POLYGON_NODES: usize = 64;

impl Canvas<'_> {
    /// Rectangle, filled for [`FILLED`], otherwise four edges of `thickness`
    /// centered on the region border.
    pub fn rect(&mut self, region: &Region, color: Color, thickness: u32) -> Result<()> {
        if thickness == FILLED {
            self.window.fill_region(region, color);
            return Ok(());
        }
        if region.is_empty() {
            return Ok(());
        }

        self.hspan(region.x0, region.x1, region.y0, color, thickness);
        self.hspan(region.x0, region.x1, region.y1, color, thickness);
        self.vspan(region.x0, region.y0, region.y1, color, thickness);
        self.vspan(region.x1, region.y0, region.y1, color, thickness);
        Ok(())
    }

    /// Horizontal line of `width` pixels starting at `(x, y)`.
    pub fn hline(&mut self, x: i32, y: i32, width: u32, color: Color, thickness: u32) -> Result<()> {
        if width > 0 {
            self.hspan(x, span_end(x, width), y, color, thickness);
        }
        Ok(())
    }

    /// Vertical line of `height` pixels starting at `(x, y)`.
    pub fn vline(&mut self, x: i32, y: i32, height: u32, color: Color, thickness: u32) -> Result<()> {
        if height > 0 {
            self.vspan(x, y, span_end(y, height), color, thickness);
        }
        Ok(())
    }

    /// Columns `x0..=x1` of row `y`; thicker lines grow around `y`.
    fn hspan(&mut self, x0: i32, x1: i32, y: i32, color: Color, thickness: u32) {
        match thickness {
            0 => {}
            1 => self.window.fill_row(y, x0, x1, color),
            _ => {
                let half = (thickness / 2) as i32;
                self.window.fill_region(
                    &Region::new(x0, y.saturating_sub(half), x1, y.saturating_add(half)),
                    color,
                );
            }
        }
    }

    /// Rows `y0..=y1` of column `x`; thicker lines grow around `x`.
    fn vspan(&mut self, x: i32, y0: i32, y1: i32, color: Color, thickness: u32) {
        match thickness {
            0 => {}
            1 => self.window.fill_column(x, y0, y1, color),
            _ => {
                let half = (thickness / 2) as i32;
                self.window.fill_region(
                    &Region::new(x.saturating_sub(half), y0, x.saturating_add(half), y1),
                    color,
                );
            }
        }
    }

    /// Line between two points, both inclusive.
    ///
    /// Axis-aligned lines take the `hline`/`vline` fast paths. Others use
    /// Bresenham's algorithm; with `thickness > 1` every step stamps a square
    /// of that size.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color, thickness: u32) -> Result<()> {
        if x0 == x1 {
            self.vspan(x0, y0.min(y1), y0.max(y1), color, thickness);
            return Ok(());
        }
        if y0 == y1 {
            self.hspan(x0.min(x1), x0.max(x1), y0, color, thickness);
            return Ok(());
        }
        if thickness == 0 {
            return Ok(());
        }

        // deltas between two i32 endpoints need 33 bits
        let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = (y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = (if dx > dy { dx } else { -dy }) / 2;
        let half = (thickness / 2) as i32;

        let (mut x, mut y) = (x0, y0);
        loop {
            // x and y stay between the endpoints, so they fit in i32
            let (px, py) = (x as i32, y as i32);
            if thickness == 1 {
                self.window.set_pixel(px, py, color);
            } else {
                self.window.fill_region(
                    &Region::new(
                        px.saturating_sub(half),
                        py.saturating_sub(half),
                        px.saturating_add(half),
                        py.saturating_add(half),
                    ),
                    color,
                );
            }
            if x == x1 && y == y1 {
                break;
            }

            let e = err;
            if e > -dx {
                err -= dy;
                x += sx;
            }
            if e < dy {
                err += dx;
                y += sy;
            }
        }
        Ok(())
    }

    /// Circle of radius `r` around `(cx, cy)` using the midpoint algorithm.
    ///
    /// [`FILLED`] emits four horizontal spans per step; any other thickness
    /// draws the one pixel outline. Circles whose bounding box misses the
    /// active window return at once.
    pub fn circle(&mut self, cx: i32, cy: i32, r: u32, color: Color, thickness: u32) -> Result<()> {
        let (cx, cy, r) = (cx as i64, cy as i64, r as i64);
        let window = self.window.region();
        if cx + r < window.x0 as i64
            || cx - r > window.x1 as i64
            || cy + r < window.y0 as i64
            || cy - r > window.y1 as i64
        {
            return Ok(());
        }

        let mut x = r;
        let mut y = 0i64;
        let mut d = 3 - 2 * r;

        while y <= x {
            if thickness == FILLED {
                self.span(cy - x, cx - y, cx + y, color);
                self.span(cy - y, cx - x, cx + x, color);
                self.span(cy + y, cx - x, cx + x, color);
                self.span(cy + x, cx - y, cx + y, color);
            } else {
                for (px, py) in [
                    (cx + x, cy - y),
                    (cx + y, cy - x),
                    (cx - y, cy - x),
                    (cx - x, cy - y),
                    (cx - x, cy + y),
                    (cx - y, cy + x),
                    (cx + y, cy + x),
                    (cx + x, cy + y),
                ] {
                    if let (Ok(px), Ok(py)) = (i32::try_from(px), i32::try_from(py)) {
                        self.window.set_pixel(px, py, color);
                    }
                }
            }

            y += 1;
            if d > 0 {
                x -= 1;
                d += 4 * (y - x) + 10;
            } else {
                d += 4 * y + 6;
            }
        }
        Ok(())
    }

    /// Row span in wide coordinates, clipped to the i32 plane.
    fn span(&mut self, y: i64, x0: i64, x1: i64, color: Color) {
        if let Ok(y) = i32::try_from(y) {
            self.window.fill_row(y, saturate(x0), saturate(x1), color);
        }
    }

    /// Closed polygon through `points`.
    ///
    /// [`FILLED`] uses an even-odd scanline fill limited to the rows of the
    /// active window. A row crossing more than [`MAX_POLYGON_NODES`] edges
    /// fails with [`Error::CapacityExceeded`] before anything is drawn.
    pub fn polygon(&mut self, points: &[Point], color: Color, thickness: u32) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }

        if thickness != FILLED {
            let mut j = points.len() - 1;
            for (i, p) in points.iter().enumerate() {
                let q = points[j];
                self.line(q.x as i32, q.y as i32, p.x as i32, p.y as i32, color, thickness)?;
                j = i;
            }
            return Ok(());
        }

        let Some((y_start, y_end)) = self.polygon_rows(points) else {
            return Ok(());
        };
        let mut nodes = [0i32; MAX_POLYGON_NODES];

        // Only polygons with more edges than nodes can overflow a scanline
        if points.len() > MAX_POLYGON_NODES {
            for y in y_start..=y_end {
                if let Err(err) = scanline_nodes(points, y, &mut nodes) {
                    warn!("polygon of {} points crosses row {} too often", points.len(), y);
                    return Err(err);
                }
            }
        }

        for y in y_start..=y_end {
            let count = scanline_nodes(points, y, &mut nodes)?;
            let row = &mut nodes[..count];
            row.sort_unstable();
            for pair in row.chunks_exact(2) {
                self.window.fill_row(y, pair[0], pair[1], color);
            }
        }
        Ok(())
    }

    /// Vertical extent of the polygon clamped to the window rows.
    fn polygon_rows(&self, points: &[Point]) -> Option<(i32, i32)> {
        let (min, max) = points.iter().fold((f32::MAX, f32::MIN), |(lo, hi), p| {
            (lo.min(p.y), hi.max(p.y))
        });
        let region = self.window.region();
        let start = (libm::floorf(min) as i32).max(region.y0);
        let end = (libm::ceilf(max) as i32).min(region.y1);
        (start <= end).then_some((start, end))
    }
}

/// Sorted-later x positions where row `y` crosses the polygon edges.
fn scanline_nodes(points: &[Point], y: i32, nodes: &mut [i32; MAX_POLYGON_NODES]) -> Result<usize> {
    let yf = y as f32;
    let mut count = 0;
    let mut j = points.len() - 1;

    for (i, pi) in points.iter().enumerate() {
        let pj = points[j];
        if (pi.y < yf && pj.y >= yf) || (pj.y < yf && pi.y >= yf) {
            if count == MAX_POLYGON_NODES {
                return Err(Error::CapacityExceeded);
            }
            nodes[count] = (pi.x + (yf - pi.y) / (pj.y - pi.y) * (pj.x - pi.x)) as i32;
            count += 1;
        }
        j = i;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::tests::window;
    use crate::framebuffer::WindowBuffer;
    use alloc::vec::Vec;
    use embedded_graphics_core::geometry::Size;

    fn lit(w: &WindowBuffer) -> Vec<(i32, i32)> {
        let r = w.region();
        let mut out = Vec::new();
        for y in r.y0..=r.y1 {
            for x in r.x0..=r.x1 {
                if w.pixel(x, y) != Some(Color::BLACK) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    fn draw(region: Region, f: impl FnOnce(&mut Canvas<'_>)) -> WindowBuffer {
        let mut w = window(region);
        let mut canvas = Canvas::new(&mut w, Size::new(64, 64));
        f(&mut canvas);
        w
    }

    #[test]
    fn filled_rect_matches_intersection() {
        let target = Region::new(3, 2, 40, 6);
        let w = draw(Region::new(0, 4, 15, 9), |c| c.rect(&target, Color::RED, FILLED).unwrap());
        for y in 4..=9 {
            for x in 0..=15 {
                let inside = target.contains(x, y);
                let expected = if inside { Color::RED } else { Color::BLACK };
                assert_eq!(w.pixel(x, y), Some(expected));
            }
        }
    }

    #[test]
    fn rect_touching_window_origin_is_drawn() {
        let w = draw(Region::new(0, 0, 7, 7), |c| c.rect(&Region::new(0, 0, 0, 0), Color::RED, FILLED).unwrap());
        assert_eq!(lit(&w), [(0, 0)]);
    }

    #[test]
    fn outlined_rect_draws_edges_only() {
        let w = draw(Region::new(0, 0, 9, 9), |c| c.rect(&Region::new(1, 1, 5, 4), Color::RED, 1).unwrap());
        let pixels = lit(&w);
        assert_eq!(pixels.len(), 2 * 5 + 2 * 2);
        assert!(!pixels.contains(&(3, 2)));
        assert!(pixels.contains(&(5, 4)));
    }

    #[test]
    fn thick_hline_is_centered() {
        let w = draw(Region::new(0, 0, 9, 9), |c| c.hline(2, 5, 3, Color::RED, 3).unwrap());
        assert_eq!(lit(&w).len(), 9);
        assert_eq!(w.pixel(2, 4), Some(Color::RED));
        assert_eq!(w.pixel(4, 6), Some(Color::RED));
        assert_eq!(w.pixel(2, 3), Some(Color::BLACK));
    }

    #[test]
    fn zero_thickness_lines_draw_nothing() {
        let w = draw(Region::new(0, 0, 9, 9), |c| {
            c.hline(0, 0, 5, Color::RED, 0).unwrap();
            c.vline(0, 0, 5, Color::RED, 0).unwrap();
        });
        assert!(lit(&w).is_empty());
    }

    #[test]
    fn axis_aligned_line_equals_fast_path() {
        let region = Region::new(0, 0, 15, 15);
        let a = draw(region, |c| c.line(4, 12, 4, 1, Color::RED, 1).unwrap());
        let b = draw(region, |c| c.vline(4, 1, 12, Color::RED, 1).unwrap());
        assert_eq!(lit(&a), lit(&b));

        let a = draw(region, |c| c.line(14, 3, 2, 3, Color::RED, 1).unwrap());
        let b = draw(region, |c| c.hline(2, 3, 13, Color::RED, 1).unwrap());
        assert_eq!(lit(&a), lit(&b));
    }

    #[test]
    fn diagonal_line_hits_both_endpoints() {
        let w = draw(Region::new(0, 0, 15, 15), |c| c.line(1, 2, 11, 7, Color::RED, 1).unwrap());
        let pixels = lit(&w);
        assert!(pixels.contains(&(1, 2)));
        assert!(pixels.contains(&(11, 7)));
        // one pixel per column on an x-major line
        assert_eq!(pixels.len(), 11);
    }

    #[test]
    fn filled_circle_covers_outline() {
        let region = Region::new(0, 0, 31, 31);
        let outline = lit(&draw(region, |c| c.circle(15, 15, 9, Color::RED, 1).unwrap()));
        let filled = lit(&draw(region, |c| c.circle(15, 15, 9, Color::RED, FILLED).unwrap()));
        assert!(outline.iter().all(|p| filled.contains(p)));
        assert!(filled.len() > outline.len());
        assert!(outline.contains(&(24, 15)));
        assert!(outline.contains(&(15, 6)));
    }

    #[test]
    fn polygon_fill_is_idempotent() {
        let tri = [Point::new(2.0, 1.0), Point::new(20.0, 4.0), Point::new(6.0, 18.0)];
        let region = Region::new(0, 0, 23, 23);
        let once = draw(region, |c| c.polygon(&tri, Color::RED, FILLED).unwrap());
        let twice = draw(region, |c| {
            c.polygon(&tri, Color::RED, FILLED).unwrap();
            c.polygon(&tri, Color::RED, FILLED).unwrap();
        });
        assert_eq!(once.pixels(), twice.pixels());
        assert!(!lit(&once).is_empty());
    }

    #[test]
    fn polygon_fill_square_interior() {
        let square = [
            Point::new(2.0, 2.0),
            Point::new(8.0, 2.0),
            Point::new(8.0, 8.0),
            Point::new(2.0, 8.0),
        ];
        let w = draw(Region::new(0, 0, 9, 9), |c| c.polygon(&square, Color::RED, FILLED).unwrap());
        assert_eq!(w.pixel(5, 5), Some(Color::RED));
        assert_eq!(w.pixel(1, 5), Some(Color::BLACK));
        assert_eq!(w.pixel(5, 9), Some(Color::BLACK));
    }

    #[test]
    fn polygon_outline_closes_the_path() {
        let tri = [Point::new(1.0, 1.0), Point::new(8.0, 1.0), Point::new(1.0, 8.0)];
        let w = draw(Region::new(0, 0, 9, 9), |c| c.polygon(&tri, Color::RED, 1).unwrap());
        assert_eq!(w.pixel(1, 5), Some(Color::RED));
        assert_eq!(w.pixel(5, 1), Some(Color::RED));
    }

    #[test]
    fn polygon_with_too_many_crossings_is_rejected() {
        // zig-zag comb: every tooth crosses row 5 twice
        let mut comb = Vec::new();
        for i in 0..40 {
            comb.push(Point::new(i as f32 * 2.0, 0.0));
            comb.push(Point::new(i as f32 * 2.0 + 1.0, 10.0));
        }
        comb.push(Point::new(80.0, 20.0));
        comb.push(Point::new(0.0, 20.0));

        let mut w = window(Region::new(0, 0, 63, 15));
        let mut canvas = Canvas::new(&mut w, Size::new(64, 64));
        assert_eq!(canvas.polygon(&comb, Color::RED, FILLED), Err(Error::CapacityExceeded));
        assert!(lit(&w).is_empty());
    }

    #[test]
    fn far_off_screen_endpoints_clip_to_the_window() {
        let region = Region::new(0, 0, 7, 7);
        let w = draw(region, |c| c.line(-2_000_000_000, 5, 2_000_000_000, 5, Color::RED, 1).unwrap());
        assert_eq!(lit(&w), (0..8).map(|x| (x, 5)).collect::<Vec<_>>());

        let w = draw(region, |c| c.line(3, i32::MIN, 3, i32::MAX, Color::RED, 1).unwrap());
        assert_eq!(lit(&w), (0..8).map(|y| (3, y)).collect::<Vec<_>>());

        let w = draw(region, |c| {
            c.hline(i32::MAX - 1, 2, u32::MAX, Color::RED, 1).unwrap();
            c.vline(2, i32::MAX - 1, u32::MAX, Color::RED, 3).unwrap();
            c.line(i32::MIN, i32::MIN, i32::MIN + 3, i32::MIN + 1, Color::RED, 5).unwrap();
        });
        assert!(lit(&w).is_empty());

        let w = draw(region, |c| c.hline(-10, 1, u32::MAX, Color::RED, 3).unwrap());
        assert_eq!(lit(&w).len(), 3 * 8);
    }

    #[test]
    fn extreme_rects_clip_to_the_window() {
        let region = Region::new(0, 0, 7, 7);
        let everything = Region::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        let w = draw(region, |c| c.rect(&everything, Color::RED, FILLED).unwrap());
        assert_eq!(lit(&w).len(), 64);

        let w = draw(region, |c| c.rect(&everything, Color::RED, 1).unwrap());
        assert!(lit(&w).is_empty());

        let w = draw(region, |c| c.rect(&Region::new(i32::MIN, 2, i32::MAX, 5), Color::RED, 1).unwrap());
        assert_eq!(lit(&w).len(), 2 * 8);
    }

    #[test]
    fn circles_with_huge_radius_or_far_center_do_not_overflow() {
        let region = Region::new(0, 0, 7, 7);
        let w = draw(region, |c| {
            c.circle(0, i32::MIN, 1 << 30, Color::RED, 1).unwrap();
            c.circle(i32::MIN, 0, (1 << 31) - 10, Color::RED, FILLED).unwrap();
            c.circle(i32::MAX - 2, i32::MAX - 2, 50, Color::RED, FILLED).unwrap();
            c.circle(i32::MIN + 2, 4, 3, Color::RED, 1).unwrap();
        });
        assert!(lit(&w).is_empty());

        // only the flat right edge of this circle reaches column 0
        let w = draw(region, |c| c.circle(-20, 4, 20, Color::RED, 1).unwrap());
        assert_eq!(lit(&w), (1..8).map(|y| (0, y)).collect::<Vec<_>>());
    }
}
