//! # Streaming Images (EBG)
//!
//! Palette-indexed, optionally animated images read incrementally from a
//! seekable byte stream.
//!
//! ## Lifecycle
//!
//! 1. [`Image::open`] checks the signature, reads header and palette and
//!    loads frame 1. A single-frame image closes its stream right away.
//! 2. [`Image::load_next`], [`Image::load_prev`] and [`Image::load_first`]
//!    replace the resident frame by reading from the stream again. A frame is
//!    read into a scratch buffer and swapped in only once it is complete, so
//!    a failed load leaves the resident frame and the stream position as they
//!    were.
//! 3. [`Image::close`] (or dropping the image) releases the stream.
//!
//! Images shared between a frame-advance task and a paint callback go
//! through [`SharedImage`], which serializes both behind a lock.
//!
//! ## Submodules
//!
//! - `ebg`: container layout, header and flags
//! - `stream`: the `ByteStream` contract and in-memory / `std::io` streams
//! - `encoder`: writes EBG files
//! - `shared`: lock-protected image handle

pub mod ebg;
pub mod encoder;
pub mod shared;
pub mod stream;

pub use ebg::{ColorMode, ImageFlags, ImageHeader, IndexSize};
pub use encoder::EbgEncoder;
pub use shared::SharedImage;
pub use stream::{ByteStream, SeekFrom, SliceStream};

use crate::canvas::Canvas;
use crate::error::{Error, IoError, Result};
use crate::framebuffer::Color;
use alloc::vec::Vec;
use ebg::{HEADER_SIZE, SIGNATURE_SIZE};
use log::{debug, warn};

/// One open EBG image with its current frame resident.
pub struct Image<S: ByteStream> {
    header: ImageHeader,
    palette: Vec<Color>,
    bitmap: Vec<u8>,
    /// Landing buffer for frame loads, empty for single-frame images.
    scratch: Vec<u8>,
    current_frame: u8,
    stream: Option<S>,
}

impl<S: ByteStream> Image<S> {
    /// Parse the header and palette and load frame 1.
    ///
    /// The stream is closed on failure and after reading a single-frame image.
    pub fn open(mut stream: S) -> Result<Self> {
        match Self::read_image(&mut stream) {
            Ok((header, palette, bitmap, scratch)) => {
                let stream = if header.frame_count == 1 {
                    stream.close();
                    None
                } else {
                    Some(stream)
                };
                Ok(Self {
                    header,
                    palette,
                    bitmap,
                    scratch,
                    current_frame: 1,
                    stream,
                })
            }
            Err(err) => {
                warn!("image open failed: {}", err);
                stream.close();
                Err(err)
            }
        }
    }

    #[allow(clippy::type_complexity)]
    fn read_image(stream: &mut S) -> Result<(ImageHeader, Vec<Color>, Vec<u8>, Vec<u8>)> {
        let mut signature = [0u8; SIGNATURE_SIZE];
        stream.read_exact(&mut signature).map_err(|_| Error::InvalidFormat)?;
        ebg::check_signature(&signature)?;

        let mut raw = [0u8; HEADER_SIZE];
        stream.read_exact(&mut raw).map_err(|_| Error::InvalidFormat)?;
        let header = ImageHeader::parse(&raw);
        if header.frame_count == 0 {
            return Err(Error::InvalidFormat);
        }

        debug!(
            "image {}x{}, transparent: {}, color mode: {}, indexed: {}, index size: {}",
            header.width,
            header.height,
            header.flags.transparent(),
            header.flags.colormode(),
            header.flags.indexed(),
            header.flags.index_size()
        );
        debug!(
            "palette size: {}, transparent index: {}, frames: {}",
            header.palette_len(),
            header.transparent_index,
            header.frame_count
        );

        let mut palette = Vec::new();
        if header.flags.indexed() {
            let len = header.palette_len();
            let mut raw = Vec::new();
            raw.try_reserve_exact(2 * len)?;
            raw.resize(2 * len, 0);
            stream.read_exact(&mut raw)?;

            palette.try_reserve_exact(len)?;
            palette.extend(
                raw.chunks_exact(2)
                    .map(|pair| Color::from_bytes([pair[0], pair[1]])),
            );
        }

        let mut bitmap = Vec::new();
        bitmap.try_reserve_exact(header.frame_size())?;
        bitmap.resize(header.frame_size(), 0);
        stream.read_exact(&mut bitmap)?;

        let mut scratch = Vec::new();
        if header.frame_count > 1 {
            scratch.try_reserve_exact(header.frame_size())?;
            scratch.resize(header.frame_size(), 0);
        }

        Ok((header, palette, bitmap, scratch))
    }

    pub fn header(&self) -> &ImageHeader {
        &self.header
    }

    pub fn width(&self) -> u32 {
        self.header.width as u32
    }

    pub fn height(&self) -> u32 {
        self.header.height as u32
    }

    pub fn frame_count(&self) -> u8 {
        self.header.frame_count
    }

    /// 1-based index of the resident frame.
    pub fn current_frame(&self) -> u8 {
        self.current_frame
    }

    /// Palette, empty for non-indexed images.
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Palette indices of the resident frame, row-major.
    pub fn bitmap(&self) -> &[u8] {
        &self.bitmap
    }

    /// Whether the backing stream is still held.
    pub fn is_stream_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Read the next frame. No-op on the last frame.
    pub fn load_next(&mut self) -> Result<()> {
        if self.current_frame >= self.header.frame_count {
            return Ok(());
        }

        self.load(None)?;
        self.current_frame += 1;
        debug!("[next frame] {}/{}", self.current_frame, self.header.frame_count);
        Ok(())
    }

    /// Re-read the previous frame. No-op on frame 1.
    ///
    /// Seeks back over the resident frame and the one before it, then reads
    /// forward again; earlier frames are never cached.
    pub fn load_prev(&mut self) -> Result<()> {
        if self.current_frame <= 1 {
            return Ok(());
        }

        let back = 2 * self.header.frame_size() as i64;
        self.load(Some(SeekFrom::Current(-back)))?;
        self.current_frame -= 1;
        debug!("[prev frame] {}/{}", self.current_frame, self.header.frame_count);
        Ok(())
    }

    /// Reload frame 1.
    ///
    /// A single-frame image has no stream left and frame 1 is already
    /// resident, so this is a no-op for it.
    pub fn load_first(&mut self) -> Result<()> {
        if self.header.frame_count == 1 {
            return Ok(());
        }

        let offset = self.header.data_offset() as u64;
        self.load(Some(SeekFrom::Start(offset)))?;
        self.current_frame = 1;
        debug!("[first frame] 1/{}", self.header.frame_count);
        Ok(())
    }

    /// Stream offset just past `frame` (1-based).
    fn frame_end(&self, frame: u8) -> u64 {
        (self.header.data_offset() + frame as usize * self.header.frame_size()) as u64
    }

    /// Optionally seek, then read one frame and make it resident.
    ///
    /// The stream sits just past the resident frame between loads. On
    /// failure it is moved back there and the resident frame is untouched.
    fn load(&mut self, seek: Option<SeekFrom>) -> Result<()> {
        let resident_end = self.frame_end(self.current_frame);
        let stream = self.stream.as_mut().ok_or(Error::Io(IoError::Closed))?;

        let mut loaded = Ok(());
        if let Some(pos) = seek {
            loaded = stream.seek(pos).map(drop);
        }
        if loaded.is_ok() {
            loaded = stream.read_exact(&mut self.scratch);
        }

        if let Err(err) = loaded {
            warn!("frame load after {}/{} failed: {}", self.current_frame, self.header.frame_count, err);
            if stream.seek(SeekFrom::Start(resident_end)).is_err() {
                warn!("stream position lost");
            }
            return Err(err.into());
        }

        core::mem::swap(&mut self.bitmap, &mut self.scratch);
        Ok(())
    }

    /// Step the animation: next frame, wrapping to frame 1 after the last.
    pub fn advance(&mut self) -> Result<()> {
        if self.current_frame < self.header.frame_count {
            self.load_next()
        } else {
            self.load_first()
        }
    }

    /// Draw the resident frame with its top-left corner at `(x, y)`.
    ///
    /// Only indexed images can be drawn; others fail with
    /// [`Error::NotSupported`].
    pub fn draw(&self, canvas: &mut Canvas<'_>, x: i32, y: i32) -> Result<()> {
        if !self.header.flags.indexed() {
            return Err(Error::NotSupported);
        }

        let (width, height) = (self.width(), self.height());
        if self.header.flags.transparent() {
            canvas.bitmap_palette_transparent(
                x,
                y,
                &self.bitmap,
                width,
                height,
                &self.palette,
                self.header.transparent_index,
            )
        } else {
            canvas.bitmap_palette(x, y, &self.bitmap, width, height, &self.palette)
        }
    }

    /// Release the stream and all buffers.
    pub fn close(mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.close();
        }
    }
}

impl<S: ByteStream> Drop for Image<S> {
    fn drop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.close();
        }
    }
}

impl Canvas<'_> {
    /// Draw the resident frame of `image` at `(x, y)`.
    pub fn draw_image<S: ByteStream>(&mut self, x: i32, y: i32, image: &Image<S>) -> Result<()> {
        image.draw(self, x, y)
    }
}
