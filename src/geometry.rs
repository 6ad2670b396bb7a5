//! # Geometry
//!
//! Integer screen regions and floating-point polygon vertices.
//!
//! Regions are inclusive on both ends: `{0, 0, 9, 9}` covers 10x10 pixels.
//! A region whose `x1 == x0 - 1` (or `y1 == y0 - 1`) is empty.

use embedded_graphics::{
    geometry::{Point as EgPoint, Size},
    primitives::Rectangle,
};

/// Axis-aligned rectangle in screen coordinates, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Region {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Region with its top-left corner at `(x, y)` spanning `width` x `height` pixels.
    ///
    /// Edges past the coordinate range saturate at `i32::MAX`.
    pub const fn from_size(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: span_end(x, width),
            y1: span_end(y, height),
        }
    }

    /// Width in pixels; degenerate regions report 0.
    #[inline]
    pub const fn width(&self) -> u32 {
        extent(self.x0, self.x1)
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        extent(self.y0, self.y1)
    }

    /// Number of pixels covered.
    #[inline]
    pub const fn area(&self) -> usize {
        (self.width() as usize).saturating_mul(self.height() as usize)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Overlap of two regions, `None` when they do not touch.
    pub fn intersection(&self, other: &Region) -> Option<Region> {
        let region = Region {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        if region.is_empty() {
            None
        } else {
            Some(region)
        }
    }
}

/// Last coordinate of a run of `len` pixels starting at `start`.
pub(crate) const fn span_end(start: i32, len: u32) -> i32 {
    saturate(start as i64 + len as i64 - 1)
}

pub(crate) const fn saturate(v: i64) -> i32 {
    if v > i32::MAX as i64 {
        i32::MAX
    } else if v < i32::MIN as i64 {
        i32::MIN
    } else {
        v as i32
    }
}

/// Pixels in `start..=end`, clamped to `u32::MAX`.
const fn extent(start: i32, end: i32) -> u32 {
    let n = end as i64 - start as i64 + 1;
    if n <= 0 {
        0
    } else if n > u32::MAX as i64 {
        u32::MAX
    } else {
        n as u32
    }
}

impl From<Rectangle> for Region {
    fn from(rect: Rectangle) -> Self {
        Region::from_size(
            rect.top_left.x,
            rect.top_left.y,
            rect.size.width,
            rect.size.height,
        )
    }
}

impl From<Region> for Rectangle {
    fn from(region: Region) -> Self {
        Rectangle::new(
            EgPoint::new(region.x0, region.y0),
            Size::new(region.width(), region.height()),
        )
    }
}

/// Polygon vertex.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point::new(x, y)
    }
}
