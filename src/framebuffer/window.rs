//! Window buffer: a fixed-capacity pixel store mirroring a movable screen region
use crate::error::{Error, Result};
use crate::framebuffer::color::Color;
use crate::geometry::Region;
use alloc::vec::Vec;

/// One half of the double-buffered window pair.
///
/// The pixel array never grows after allocation. The buffer's [`Region`] says
/// which part of the screen it currently holds; pixels are stored row-major
/// with a stride equal to the region width.
pub struct WindowBuffer {
    region: Region,
    pixels: Vec<Color>,
}

impl WindowBuffer {
    /// Allocate `capacity` pixels, all set to `fill`. The initial region is empty.
    pub fn with_capacity(capacity: usize, fill: Color) -> Result<Self> {
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(capacity)?;
        pixels.resize(capacity, fill);

        Ok(Self {
            region: Region::new(0, 0, -1, -1),
            pixels,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn region(&self) -> Region {
        self.region
    }

    /// Move the window. Fails if the region holds more pixels than the buffer.
    pub fn set_region(&mut self, region: Region) -> Result<()> {
        if region.area() > self.capacity() {
            return Err(Error::CapacityExceeded);
        }
        self.region = region;
        Ok(())
    }

    #[inline]
    fn stride(&self) -> usize {
        self.region.width() as usize
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.region.contains(x, y) {
            return None;
        }
        Some((y - self.region.y0) as usize * self.stride() + (x - self.region.x0) as usize)
    }

    /// The pixels of the current region, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels[..self.region.area()]
    }

    /// Read back one pixel in screen coordinates.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Write one pixel; returns `false` when it falls outside the window.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = color;
                true
            }
            None => false,
        }
    }

    /// Fill columns `x0..=x1` of row `y`, clipped to the window.
    pub fn fill_row(&mut self, y: i32, x0: i32, x1: i32, color: Color) {
        if y < self.region.y0 || y > self.region.y1 {
            return;
        }
        let start = x0.max(self.region.x0);
        let end = x1.min(self.region.x1);
        if start > end {
            return;
        }
        let row = (y - self.region.y0) as usize * self.stride();
        let from = row + (start - self.region.x0) as usize;
        let to = row + (end - self.region.x0) as usize;
        self.pixels[from..=to].fill(color);
    }

    /// Fill rows `y0..=y1` of column `x`, clipped to the window.
    pub fn fill_column(&mut self, x: i32, y0: i32, y1: i32, color: Color) {
        if x < self.region.x0 || x > self.region.x1 {
            return;
        }
        let start = y0.max(self.region.y0);
        let end = y1.min(self.region.y1);
        let stride = self.stride();
        let col = (x - self.region.x0) as usize;
        for y in start..=end {
            self.pixels[(y - self.region.y0) as usize * stride + col] = color;
        }
    }

    /// Fill the part of `region` that overlaps the window.
    ///
    /// The first row is written pixel by pixel, the rest are copied from it.
    pub fn fill_region(&mut self, region: &Region, color: Color) {
        let Some(clip) = region.intersection(&self.region) else {
            return;
        };

        let stride = self.stride();
        let x_offset = (clip.x0 - self.region.x0) as usize;
        let len = clip.width() as usize;
        let first_row = (clip.y0 - self.region.y0) as usize;
        let last_row = (clip.y1 - self.region.y0) as usize;

        let src = first_row * stride + x_offset;
        self.pixels[src..src + len].fill(color);

        for row in first_row + 1..=last_row {
            self.pixels.copy_within(src..src + len, row * stride + x_offset);
        }
    }

    /// Fill the whole window.
    pub fn clear(&mut self, color: Color) {
        let area = self.region.area();
        self.pixels[..area].fill(color);
    }
}
