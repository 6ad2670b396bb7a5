//! # Windowed Frame Buffer
//!
//! Pixel storage for the rendering engine.
//!
//! ## Modules
//!
//! - `window`: `WindowBuffer`, a fixed-capacity buffer tagged with the screen
//!   region it currently mirrors
//! - `color`: `Color` type with common color constants
//!
//! ## Architecture
//!
//! The engine never holds a full-screen framebuffer:
//! 1. Two `WindowBuffer`s of capacity `width * buffer_rows` are allocated once
//! 2. Only the active buffer receives draw writes
//! 3. After a strip is painted it is handed to the transport and the other
//!    buffer becomes active, so the transport can still drain the first one

pub mod color;
pub mod window;

pub use color::Color;
pub use window::WindowBuffer;
