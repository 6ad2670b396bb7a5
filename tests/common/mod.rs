#![allow(dead_code)]

use embedded_graphics_core::geometry::Size;
use stripgfx::{Canvas, Color, Font, Region, Transport, WindowBuffer};

/// 8x4 cells starting at 'A': A (ink 4), B (ink 1), C (ink 6), D (accent, ink 2).
#[rustfmt::skip]
pub const GLYPHS: [u8; 16] = [
    0b0110_0000, 0b1001_0000, 0b1111_0000, 0b1001_0000,
    0b1000_0000, 0b1000_0000, 0b1000_0000, 0b1000_0000,
    0b1111_1100, 0b1000_0000, 0b1000_0000, 0b1111_1100,
    0b0100_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000,
];

pub const PROPORTIONAL: Font<'static> = Font::new(false, 8, 4, b'A', &GLYPHS);
pub const MONOSPACE: Font<'static> = Font::new(true, 8, 4, b'A', &GLYPHS);

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Transport that keeps every window it is sent.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub windows: Vec<(Region, Vec<Color>)>,
}

impl Transport for RecordingTransport {
    type Error = ();

    fn send_window(&mut self, region: Region, pixels: &[Color]) -> Result<(), ()> {
        assert_eq!(pixels.len(), region.area());
        self.windows.push((region, pixels.to_vec()));
        Ok(())
    }
}

impl RecordingTransport {
    /// Panel contents after applying every window in order. Pixels never
    /// sent are `None`.
    pub fn panel(&self, width: u32, height: u32) -> Vec<Option<Color>> {
        let mut panel = vec![None; (width * height) as usize];
        for (region, pixels) in &self.windows {
            let mut it = pixels.iter();
            for y in region.y0..=region.y1 {
                for x in region.x0..=region.x1 {
                    let color = *it.next().unwrap();
                    panel[(y as u32 * width + x as u32) as usize] = Some(color);
                }
            }
        }
        panel
    }
}

/// Run `paint` once over a single buffer covering the whole panel.
pub fn render_whole<F>(width: u32, height: u32, font: Option<Font<'static>>, paint: F) -> Vec<Option<Color>>
where
    F: FnOnce(&mut Canvas<'_>),
{
    let bounds = Region::from_size(0, 0, width, height);
    let mut window = WindowBuffer::with_capacity(bounds.area(), Color::BLACK).unwrap();
    window.set_region(bounds).unwrap();
    let mut canvas = Canvas::new(&mut window, Size::new(width, height)).with_font(font);
    paint(&mut canvas);
    window.pixels().iter().copied().map(Some).collect()
}
