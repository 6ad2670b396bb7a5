//! # stripgfx
//!
//! Windowed, double-buffered 2D graphics for small SPI/parallel panels on
//! devices that cannot hold a full frame in RAM.
//!
//! Drawing never touches the whole screen. Two [`WindowBuffer`]s of
//! `width * buffer_rows` pixels each take turns: one is painted while the
//! other is handed to the [`Transport`], and a refresh slides the active
//! window over the panel strip by strip.
//!
//! ```text
//! Display ──► strips(target) ──► WindowBuffer (active) ──► Canvas ──► paint()
//!    │                                  │
//!    └──────────── flush ◄──────────────┘──► Transport::send_window
//! ```
//!
//! ## Modules
//!
//! - [`geometry`]: regions and polygon points
//! - [`framebuffer`]: colors and window buffers
//! - [`display`]: configuration, transport and the refresh scheduler
//! - [`canvas`]: clipped drawing primitives, bitmaps and text
//! - [`font`]: bitmap fonts and proportional text layout
//! - [`image`]: the EBG streaming image codec
//!
//! The crate is `no_std` and needs an allocator. The `std` feature adds
//! `image::stream::IoStream` for reading images from files.

#![cfg_attr(not(test), no_std)]

extern crate alloc;
#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod canvas;
pub mod display;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod geometry;
pub mod image;

pub use canvas::{Canvas, FILLED};
pub use display::{Display, DisplayConfig, Transport};
pub use error::{Error, IoError, Result};
pub use font::Font;
pub use framebuffer::{Color, WindowBuffer};
pub use geometry::{Point, Region};
pub use image::{EbgEncoder, Image, SharedImage};
