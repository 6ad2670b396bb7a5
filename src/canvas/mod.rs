//! # Canvas
//!
//! Drawing surface handed to paint callbacks.
//!
//! A `Canvas` borrows the active [`WindowBuffer`] and exposes every primitive
//! in logical screen coordinates. Only pixels inside the window's current
//! region are written; everything else is dropped and the call still returns
//! `Ok(())`. A paint callback therefore draws the whole scene on every strip
//! and lets clipping keep what belongs to that strip.
//!
//! ## Submodules
//!
//! - `primitives`: rectangles, lines, circles, polygons
//! - `bitmap`: monochrome and palette-indexed blits
//! - `text`: glyph and string drawing
//!
//! `Canvas` also implements embedded-graphics' `DrawTarget`, so styled
//! primitives and text from that crate can be drawn into a strip.

mod bitmap;
mod primitives;
mod text;

pub use primitives::{FILLED, MAX_POLYGON_NODES};

use crate::error::Result;
use crate::font::Font;
use crate::framebuffer::{Color, WindowBuffer};
use crate::geometry::Region;
use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::Rgb565,
    primitives::Rectangle,
    Pixel,
};

pub struct Canvas<'a> {
    window: &'a mut WindowBuffer,
    size: Size,
    font: Option<Font<'a>>,
}

impl<'a> Canvas<'a> {
    /// Canvas over `window` for a display of `size`.
    pub fn new(window: &'a mut WindowBuffer, size: Size) -> Self {
        Self {
            window,
            size,
            font: None,
        }
    }

    pub fn with_font(mut self, font: Option<Font<'a>>) -> Self {
        self.font = font;
        self
    }

    pub fn font(&self) -> Option<&Font<'a>> {
        self.font.as_ref()
    }

    /// Screen region the active window currently covers.
    pub fn region(&self) -> Region {
        self.window.region()
    }

    pub fn window(&self) -> &WindowBuffer {
        self.window
    }

    /// Display size in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn pixel(&mut self, x: i32, y: i32, color: Color) -> Result<()> {
        self.window.set_pixel(x, y, color);
        Ok(())
    }

    /// Fill the whole active window.
    pub fn clear(&mut self, color: Color) -> Result<()> {
        self.window.clear(color);
        Ok(())
    }
}

impl OriginDimensions for Canvas<'_> {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.window.set_pixel(point.x, point.y, color.into());
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> core::result::Result<(), Self::Error> {
        self.window.fill_region(&Region::from(*area), color.into());
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> core::result::Result<(), Self::Error> {
        self.window.clear(color.into());
        Ok(())
    }
}
