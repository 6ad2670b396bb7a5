//! # Display and Refresh Scheduler
//!
//! Owns the two window buffers and the transport, and drives repaints.
//!
//! ## Refresh
//!
//! [`Display::refresh_region`] slides the active window down the target
//! region in horizontal strips:
//!
//! ```text
//!   target            strip height = min(capacity / width, height)
//! +---------+
//! | strip 0 |  paint -> flush (buffer A)
//! | strip 1 |  paint -> flush (buffer B)
//! | strip 2 |  paint -> flush (buffer A)
//! | strip 3 |  last strip is clamped to the target
//! +---------+
//! ```
//!
//! The paint callback receives the whole target region and draws freely;
//! the canvas clips every write to the current strip. After each flush the
//! buffers swap, so a transport that is still draining one buffer is not
//! overwritten while the next strip is painted.
//!
//! A refresh borrows the display mutably, so two refreshes can never run at
//! the same time.

use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::font::Font;
use crate::framebuffer::{Color, WindowBuffer};
use crate::geometry::Region;
use core::fmt;
use embedded_graphics_core::geometry::Size;
use log::{debug, trace, warn};

/// Rows of display width held by each window buffer unless configured otherwise.
pub const DEFAULT_BUFFER_ROWS: u32 = 160;

/// Sink for finished strips.
pub trait Transport {
    type Error: fmt::Debug;

    /// Send `pixels` (row-major, `region.area()` entries) to the panel area `region`.
    fn send_window(&mut self, region: Region, pixels: &[Color]) -> core::result::Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn send_window(&mut self, region: Region, pixels: &[Color]) -> core::result::Result<(), Self::Error> {
        (**self).send_window(region, pixels)
    }
}

/// Panel geometry and window buffer size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    /// Each window buffer holds `width * buffer_rows` pixels.
    pub buffer_rows: u32,
}

impl DisplayConfig {
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buffer_rows: DEFAULT_BUFFER_ROWS,
        }
    }

    pub const fn with_buffer_rows(mut self, rows: u32) -> Self {
        self.buffer_rows = rows;
        self
    }

    /// Pixels per window buffer.
    pub const fn capacity(&self) -> usize {
        self.width as usize * self.buffer_rows as usize
    }

    /// The whole panel as a region.
    pub const fn bounds(&self) -> Region {
        Region::from_size(0, 0, self.width, self.height)
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.buffer_rows == 0 {
            return Err(Error::InvalidArgument);
        }
        if self.width > i32::MAX as u32 || self.height > i32::MAX as u32 {
            return Err(Error::InvalidArgument);
        }
        Ok(())
    }
}

/// Rendering engine for one panel.
pub struct Display<T: Transport> {
    config: DisplayConfig,
    buffers: [WindowBuffer; 2],
    active: usize,
    transport: T,
    font: Option<Font<'static>>,
}

impl<T: Transport> Display<T> {
    /// Allocate both window buffers.
    pub fn new(config: DisplayConfig, transport: T) -> Result<Self> {
        config.validate()?;

        let capacity = config.capacity();
        let first = WindowBuffer::with_capacity(capacity, Color::BLACK)?;
        let second = WindowBuffer::with_capacity(capacity, Color::WHITE)?;

        debug!(
            "display {}x{}, window capacity {} px ({} rows)",
            config.width, config.height, capacity, config.buffer_rows
        );

        Ok(Self {
            config,
            buffers: [first, second],
            active: 0,
            transport,
            font: None,
        })
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }

    /// Pixels per window buffer.
    pub fn capacity(&self) -> usize {
        self.config.capacity()
    }

    pub fn set_font(&mut self, font: Font<'static>) {
        self.font = Some(font);
    }

    pub fn font(&self) -> Option<&Font<'static>> {
        self.font.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// The buffer that receives draw writes.
    pub fn active_window(&self) -> &WindowBuffer {
        &self.buffers[self.active]
    }

    /// Move the active window by hand, for drawing outside a refresh.
    pub fn set_window(&mut self, region: Region) -> Result<()> {
        self.buffers[self.active].set_region(region)
    }

    /// Canvas over the active window.
    pub fn canvas(&mut self) -> Canvas<'_> {
        let size = Size::new(self.config.width, self.config.height);
        Canvas::new(&mut self.buffers[self.active], size).with_font(self.font)
    }

    /// Repaint `target` strip by strip.
    ///
    /// `paint` runs once per strip. An error from `paint` or from the
    /// transport stops the refresh and is returned; strips already sent stay
    /// on the panel.
    pub fn refresh_region<F>(&mut self, target: &Region, mut paint: F) -> Result<()>
    where
        F: FnMut(&mut Canvas<'_>, &Region) -> Result<()>,
    {
        for strip in strips(target, self.capacity())? {
            trace!(
                "strip [{}:{}, {}:{}]",
                strip.x0, strip.x1, strip.y0, strip.y1
            );
            self.set_window(strip)?;
            paint(&mut self.canvas(), target)?;
            self.flush()?;
        }
        Ok(())
    }

    /// Repaint the whole panel.
    pub fn refresh<F>(&mut self, paint: F) -> Result<()>
    where
        F: FnMut(&mut Canvas<'_>, &Region) -> Result<()>,
    {
        let bounds = self.config.bounds();
        self.refresh_region(&bounds, paint)
    }

    /// Send the active window to the transport and make the other buffer active.
    pub fn flush(&mut self) -> Result<()> {
        let window = &self.buffers[self.active];
        let sent = self.transport.send_window(window.region(), window.pixels());
        self.active ^= 1;

        sent.map_err(|err| {
            warn!("transport rejected window: {:?}", err);
            Error::Transport
        })
    }

    /// Tear the display down, releasing both buffers.
    pub fn into_transport(self) -> T {
        self.transport
    }
}

/// Strip partition of `target` for buffers of `capacity` pixels.
///
/// Fails with [`Error::CapacityExceeded`] when not even one row of the target
/// fits in a buffer. An empty target yields no strips.
pub fn strips(target: &Region, capacity: usize) -> Result<Strips> {
    if target.is_empty() {
        return Ok(Strips {
            target: *target,
            step: 1,
            next_y: target.y1 as i64 + 1,
        });
    }

    let rows = capacity / target.width() as usize;
    let step = rows.min(target.height() as usize);
    if step < 1 {
        return Err(Error::CapacityExceeded);
    }

    Ok(Strips {
        target: *target,
        step: step as i64,
        next_y: target.y0 as i64,
    })
}

/// Iterator over the strips of one refresh.
#[derive(Debug, Clone)]
pub struct Strips {
    target: Region,
    step: i64,
    next_y: i64,
}

impl Strips {
    /// Rows per strip (the last strip may be shorter).
    pub fn strip_height(&self) -> u32 {
        self.step as u32
    }
}

impl Iterator for Strips {
    type Item = Region;

    fn next(&mut self) -> Option<Region> {
        let last = self.target.y1 as i64;
        if self.next_y > last {
            return None;
        }
        let y = self.next_y;
        let y1 = (y + self.step - 1).min(last);
        self.next_y = y1 + 1;

        // both rows lie inside the target
        Some(Region::new(self.target.x0, y as i32, self.target.x1, y1 as i32))
    }
}
