mod common;

use common::{init_logging, render_whole, RecordingTransport, PROPORTIONAL};
use stripgfx::{Canvas, Color, Display, DisplayConfig, Error, Point, Region, FILLED};

const WIDTH: u32 = 24;
const HEIGHT: u32 = 30;

fn scene(canvas: &mut Canvas<'_>) {
    canvas.clear(Color::BLACK).unwrap();
    canvas.rect(&Region::new(2, 3, 15, 20), Color::RED, FILLED).unwrap();
    canvas.rect(&Region::new(1, 1, 22, 28), Color::WHITE, 1).unwrap();
    canvas.line(0, 29, 23, 0, Color::GREEN, 1).unwrap();
    canvas.line(3, 25, 20, 27, Color::GRAY, 3).unwrap();
    canvas.circle(12, 14, 6, Color::BLUE, FILLED).unwrap();
    canvas.circle(12, 14, 9, Color::YELLOW, 1).unwrap();
    let triangle = [Point::new(4.0, 22.0), Point::new(20.0, 18.0), Point::new(10.0, 29.0)];
    canvas.polygon(&triangle, Color::CYAN, FILLED).unwrap();
    canvas.draw_string(5, 6, b"AB C\nCA", Color::MAGENTA).unwrap();
}

fn refresh_with_rows(rows: u32) -> RecordingTransport {
    let config = DisplayConfig::new(WIDTH, HEIGHT).with_buffer_rows(rows);
    let mut display = Display::new(config, RecordingTransport::default()).unwrap();
    display.set_font(PROPORTIONAL);
    display
        .refresh(|canvas, _| {
            scene(canvas);
            Ok(())
        })
        .unwrap();
    display.into_transport()
}

#[test]
fn strips_cover_every_row_once() {
    init_logging();
    for rows in [1, 2, 7, 29, 30, 160] {
        let transport = refresh_with_rows(rows);
        let mut next = 0;
        for (region, _) in &transport.windows {
            assert_eq!((region.x0, region.x1), (0, WIDTH as i32 - 1));
            assert_eq!(region.y0, next);
            assert!(region.height() <= rows);
            next = region.y1 + 1;
        }
        assert_eq!(next, HEIGHT as i32, "buffer rows {rows}");
        assert_eq!(transport.windows.len(), HEIGHT.div_ceil(rows.min(HEIGHT)) as usize);
    }
}

#[test]
fn stitched_strips_match_whole_frame() {
    let expected = render_whole(WIDTH, HEIGHT, Some(PROPORTIONAL), scene);
    for rows in [1, 3, 8, 13, 30] {
        let transport = refresh_with_rows(rows);
        assert_eq!(transport.panel(WIDTH, HEIGHT), expected, "buffer rows {rows}");
    }
}

#[test]
fn partial_refresh_only_sends_target() {
    let config = DisplayConfig::new(WIDTH, HEIGHT).with_buffer_rows(4);
    let mut display = Display::new(config, RecordingTransport::default()).unwrap();
    let target = Region::new(5, 10, 14, 21);
    let mut painted = 0;

    display
        .refresh_region(&target, |canvas, region| {
            assert_eq!(*region, target);
            painted += 1;
            canvas.clear(Color::GREEN)
        })
        .unwrap();

    let transport = display.into_transport();
    assert_eq!(painted, 2);
    let panel = transport.panel(WIDTH, HEIGHT);
    for y in 0..HEIGHT as i32 {
        for x in 0..WIDTH as i32 {
            let expected = target.contains(x, y).then_some(Color::GREEN);
            assert_eq!(panel[(y * WIDTH as i32 + x) as usize], expected, "({x}, {y})");
        }
    }
}

#[test]
fn target_wider_than_buffer_is_rejected() {
    let config = DisplayConfig::new(10, 10).with_buffer_rows(5);
    let mut display = Display::new(config, RecordingTransport::default()).unwrap();
    let result = display.refresh_region(&Region::new(0, 0, 99, 3), |_, _| Ok(()));
    assert_eq!(result, Err(Error::CapacityExceeded));
    assert!(display.transport().windows.is_empty());
}

#[test]
fn drawing_outside_the_strip_is_clipped() {
    let config = DisplayConfig::new(8, 8).with_buffer_rows(2);
    let mut display = Display::new(config, RecordingTransport::default()).unwrap();
    display.set_window(Region::new(0, 2, 7, 3)).unwrap();

    let mut canvas = display.canvas();
    canvas.clear(Color::BLACK).unwrap();
    canvas.rect(&Region::new(-5, -5, 20, 20), Color::RED, FILLED).unwrap();
    canvas.pixel(100, 100, Color::BLUE).unwrap();

    assert!(display.active_window().pixels().iter().all(|&c| c == Color::RED));
}
