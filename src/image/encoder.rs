//! EBG writer
//!
//! Produces the byte layout read by [`Image::open`](super::Image::open):
//! RGB565 color mode with one palette index byte per pixel.

use super::ebg::{ColorMode, ImageFlags, ImageHeader, IndexSize, SIGNATURE, VERSION};
use crate::error::{Error, Result};
use crate::framebuffer::Color;
use alloc::vec::Vec;

/// Builder for an indexed EBG image.
#[derive(Debug, Clone)]
pub struct EbgEncoder {
    width: u16,
    height: u16,
    palette: Vec<Color>,
    transparent: Option<u8>,
    frames: Vec<Vec<u8>>,
}

impl EbgEncoder {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            palette: Vec::new(),
            transparent: None,
            frames: Vec::new(),
        }
    }

    pub fn palette(mut self, colors: &[Color]) -> Self {
        self.palette = colors.to_vec();
        self
    }

    /// Mark palette index `index` as transparent.
    pub fn transparent_index(mut self, index: u8) -> Self {
        self.transparent = Some(index);
        self
    }

    /// Append one frame of `width * height` palette indices.
    pub fn frame(mut self, indices: &[u8]) -> Self {
        self.frames.push(indices.to_vec());
        self
    }

    fn header(&self) -> Result<ImageHeader> {
        let palette_size = match self.palette.len() {
            1..=256 => (self.palette.len() - 1) as u8,
            _ => return Err(Error::InvalidArgument),
        };
        if let Some(index) = self.transparent {
            if index as usize >= self.palette.len() {
                return Err(Error::InvalidArgument);
            }
        }
        let frame_count = match self.frames.len() {
            1..=255 => self.frames.len() as u8,
            _ => return Err(Error::InvalidArgument),
        };

        Ok(ImageHeader {
            width: self.width,
            height: self.height,
            flags: ImageFlags::new(
                ColorMode::Rgb565,
                true,
                IndexSize::Byte,
                self.transparent.is_some(),
            ),
            palette_size,
            transparent_index: self.transparent.unwrap_or(0),
            frame_count,
        })
    }

    /// Serialize the image.
    ///
    /// Fails with [`Error::InvalidArgument`] for an empty or oversized
    /// palette, a transparent index outside it, no frames or more than 255,
    /// or a frame of the wrong size.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let header = self.header()?;
        let frame_size = header.frame_size();
        if self.frames.iter().any(|frame| frame.len() != frame_size) {
            return Err(Error::InvalidArgument);
        }

        let mut out = Vec::new();
        out.try_reserve_exact(header.data_offset() + frame_size * self.frames.len())?;
        out.extend_from_slice(&SIGNATURE);
        out.push(VERSION);
        out.extend_from_slice(&header.to_bytes());
        for color in &self.palette {
            out.extend_from_slice(&color.to_bytes());
        }
        for frame in &self.frames {
            out.extend_from_slice(frame);
        }
        Ok(out)
    }
}
