//! Seekable byte streams backing an open image
use crate::error::IoError;

/// Seek origin, mirroring `std::io::SeekFrom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekFrom {
    Start(u64),
    Current(i64),
    End(i64),
}

/// Minimal stream contract the image codec needs.
pub trait ByteStream {
    /// Read up to `buf.len()` bytes, returning how many were read. `0` means
    /// end of stream.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, IoError>;

    /// Move the cursor, returning the new absolute position.
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, IoError>;

    /// Release the underlying resource. Further reads may fail.
    fn close(&mut self) {}

    /// Fill `buf` completely or fail with [`IoError::UnexpectedEof`].
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), IoError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..])? {
                0 => {
                    return Err(IoError::UnexpectedEof {
                        expected: buf.len(),
                        read: filled,
                    })
                }
                n => filled += n,
            }
        }
        Ok(())
    }
}

impl<S: ByteStream + ?Sized> ByteStream for &mut S {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, IoError> {
        (**self).read(buf)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, IoError> {
        (**self).seek(pos)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// In-memory stream, e.g. over an image embedded with `include_bytes!`.
#[derive(Debug, Clone)]
pub struct SliceStream<B> {
    data: B,
    pos: usize,
    closed: bool,
}

impl<B: AsRef<[u8]>> SliceStream<B> {
    pub fn new(data: B) -> Self {
        Self {
            data,
            pos: 0,
            closed: false,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<B: AsRef<[u8]>> ByteStream for SliceStream<B> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, IoError> {
        if self.closed {
            return Err(IoError::Closed);
        }
        let data = self.data.as_ref();
        let remaining = data.get(self.pos..).unwrap_or(&[]);
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, IoError> {
        if self.closed {
            return Err(IoError::Closed);
        }
        let len = self.data.as_ref().len() as i64;
        let target = match pos {
            SeekFrom::Start(offset) => i64::try_from(offset).map_err(|_| IoError::Seek)?,
            SeekFrom::Current(delta) => self.pos as i64 + delta,
            SeekFrom::End(delta) => len + delta,
        };
        if target < 0 {
            return Err(IoError::Seek);
        }
        self.pos = target as usize;
        Ok(target as u64)
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// Adapter for any `std::io` reader that can seek, such as a `File`.
#[cfg(feature = "std")]
pub struct IoStream<R> {
    inner: Option<R>,
}

#[cfg(feature = "std")]
impl<R: std::io::Read + std::io::Seek> IoStream<R> {
    pub fn new(inner: R) -> Self {
        Self { inner: Some(inner) }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read + std::io::Seek> ByteStream for IoStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, IoError> {
        let inner = self.inner.as_mut().ok_or(IoError::Closed)?;
        loop {
            match inner.read(buf) {
                Ok(n) => return Ok(n),
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(_) => return Err(IoError::Other),
            }
        }
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, IoError> {
        let inner = self.inner.as_mut().ok_or(IoError::Closed)?;
        let pos = match pos {
            SeekFrom::Start(offset) => std::io::SeekFrom::Start(offset),
            SeekFrom::Current(delta) => std::io::SeekFrom::Current(delta),
            SeekFrom::End(delta) => std::io::SeekFrom::End(delta),
        };
        inner.seek(pos).map_err(|_| IoError::Seek)
    }

    fn close(&mut self) {
        self.inner = None;
    }
}
