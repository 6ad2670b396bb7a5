//! # Error Types
//!
//! Every fallible operation in the crate returns [`Result`]. Drawing outside
//! the active window is never an error: primitives clip silently and return
//! `Ok(())`, because paint callbacks routinely draw full-screen shapes into a
//! strip that only covers a few rows.

use alloc::collections::TryReserveError;
use core::fmt;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Failure kinds of the engine, the rasterizer and the image codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A window buffer, palette or bitmap could not be allocated.
    AllocationFailure,
    /// A region is wider than one strip can hold, or a polygon scanline has
    /// more intersections than the node table.
    CapacityExceeded,
    /// Bad signature, version or truncated header on image open.
    InvalidFormat,
    /// A caller-supplied value is unusable, such as text without a font or a
    /// bitmap shorter than its dimensions.
    InvalidArgument,
    /// The image color mode has no blitter (only indexed images draw).
    NotSupported,
    /// The backing stream failed while reading an image.
    Io(IoError),
    /// The display transport rejected a window.
    Transport,
}

/// Failures of the backing byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoError {
    UnexpectedEof { expected: usize, read: usize },
    Seek,
    /// The stream was already released (single-frame images close it on open).
    Closed,
    Other,
}

impl From<IoError> for Error {
    fn from(err: IoError) -> Self {
        Error::Io(err)
    }
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::AllocationFailure
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AllocationFailure => write!(f, "allocation failed"),
            Error::CapacityExceeded => write!(f, "capacity exceeded"),
            Error::InvalidFormat => write!(f, "invalid image format"),
            Error::InvalidArgument => write!(f, "invalid argument"),
            Error::NotSupported => write!(f, "operation not supported"),
            Error::Io(err) => write!(f, "I/O failure: {}", err),
            Error::Transport => write!(f, "display transport failure"),
        }
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoError::UnexpectedEof { expected, read } => {
                write!(f, "short read ({}/{} bytes)", read, expected)
            }
            IoError::Seek => write!(f, "seek failed"),
            IoError::Closed => write!(f, "stream closed"),
            IoError::Other => write!(f, "stream error"),
        }
    }
}

impl core::error::Error for Error {}
impl core::error::Error for IoError {}
