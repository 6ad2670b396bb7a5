//! Image handle shared between a frame-advance task and the render loop
//!
//! Frame loads rewrite the resident bitmap in place. Both the loader and
//! [`SharedImage::draw`] take the same spin lock, so a paint callback never
//! sees a half-read frame.

use super::{ByteStream, Image};
use crate::canvas::Canvas;
use crate::error::Result;
use alloc::sync::Arc;
use spin::{Mutex, MutexGuard};

pub struct SharedImage<S: ByteStream> {
    inner: Arc<Mutex<Image<S>>>,
}

impl<S: ByteStream> Clone for SharedImage<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ByteStream> SharedImage<S> {
    pub fn new(image: Image<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(image)),
        }
    }

    pub fn open(stream: S) -> Result<Self> {
        Image::open(stream).map(Self::new)
    }

    /// Exclusive access for anything the helpers below do not cover.
    pub fn lock(&self) -> MutexGuard<'_, Image<S>> {
        self.inner.lock()
    }

    pub fn load_next(&self) -> Result<()> {
        self.inner.lock().load_next()
    }

    pub fn load_prev(&self) -> Result<()> {
        self.inner.lock().load_prev()
    }

    pub fn load_first(&self) -> Result<()> {
        self.inner.lock().load_first()
    }

    /// Next frame, wrapping after the last.
    pub fn advance(&self) -> Result<()> {
        self.inner.lock().advance()
    }

    pub fn current_frame(&self) -> u8 {
        self.inner.lock().current_frame()
    }

    pub fn draw(&self, canvas: &mut Canvas<'_>, x: i32, y: i32) -> Result<()> {
        self.inner.lock().draw(canvas, x, y)
    }
}
