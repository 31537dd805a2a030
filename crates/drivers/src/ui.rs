use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use inkpad_adapters::present_export;
use inkpad_application::{DispatchTable, EventOutcome, PadEvent, SignaturePadService};
use inkpad_domain::{PixelBuffer, Point, Rgba};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use tracing::{info, warn};

const CANVAS_MARGIN: usize = 24;
const HEADER_TOP: usize = 16;
const HEADER_HEIGHT: usize = 40;
const CANVAS_TOP: usize = HEADER_TOP + HEADER_HEIGHT + 16;
const FOOTER_HEIGHT: usize = 40;
const CHROME_COLOR: u32 = 0x222222;

const INK_PALETTE: [&str; 4] = ["#000000", "#1f3a93", "#c0392b", "#1e8449"];
const BACKGROUND_PALETTE: [&str; 4] = ["#ffffff", "#fdf6e3", "#e8f0fe", "#2d2d2d"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    window_width: usize,
    window_height: usize,
    canvas_left: usize,
    canvas_top: usize,
    canvas_width: usize,
    canvas_height: usize,
}

impl Layout {
    fn for_canvas(canvas: &PixelBuffer) -> Self {
        let canvas_width = canvas.width() as usize;
        let canvas_height = canvas.height() as usize;
        Self {
            window_width: canvas_width + 2 * CANVAS_MARGIN,
            window_height: CANVAS_TOP + canvas_height + FOOTER_HEIGHT,
            canvas_left: CANVAS_MARGIN,
            canvas_top: CANVAS_TOP,
            canvas_width,
            canvas_height,
        }
    }

    /// Window coordinates to canvas coordinates, if inside the canvas.
    fn to_canvas(&self, mouse_x: f32, mouse_y: f32) -> Option<Point> {
        let x = mouse_x - self.canvas_left as f32;
        let y = mouse_y - self.canvas_top as f32;
        if x < 0.0 || y < 0.0 || x >= self.canvas_width as f32 || y >= self.canvas_height as f32 {
            return None;
        }
        Some(Point::new(x, y))
    }
}

#[derive(Debug, Default)]
struct Palettes {
    ink: usize,
    background: usize,
}

impl Palettes {
    fn next_ink(&mut self) -> &'static str {
        self.ink = (self.ink + 1) % INK_PALETTE.len();
        INK_PALETTE[self.ink]
    }

    fn next_background(&mut self) -> &'static str {
        self.background = (self.background + 1) % BACKGROUND_PALETTE.len();
        BACKGROUND_PALETTE[self.background]
    }
}

pub fn launch_window(mut service: SignaturePadService) -> Result<(), String> {
    let table = DispatchTable::standard();
    let layout = Layout::for_canvas(service.canvas());
    let mut window = Window::new(
        "inkpad",
        layout.window_width,
        layout.window_height,
        WindowOptions::default(),
    )
    .map_err(|error| format!("failed to start UI window: {error}"))?;
    window.limit_update_rate(Some(Duration::from_micros(16_000)));

    let mut frame = vec![CHROME_COLOR; layout.window_width * layout.window_height];
    let mut palettes = Palettes::default();
    let mut was_mouse_down = false;
    let mut last_point: Option<Point> = None;
    let mut status = "ready".to_string();
    info!(
        width = layout.canvas_width,
        height = layout.canvas_height,
        "signature pad opened"
    );

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let mut events = Vec::new();
        for key in window.get_keys_pressed(KeyRepeat::No) {
            match key {
                Key::C => events.push(PadEvent::ClearPressed),
                Key::S => events.push(PadEvent::SavePressed),
                Key::F => events.push(PadEvent::FilterPressed),
                Key::T => events.push(PadEvent::TextPressed),
                Key::I => events.push(PadEvent::InkColorPicked(palettes.next_ink().to_string())),
                Key::B => events.push(PadEvent::BackgroundColorPicked(
                    palettes.next_background().to_string(),
                )),
                Key::U => {
                    if let Some(path) = prompt_line("Image to upload: ") {
                        events.push(PadEvent::ImageChosen(PathBuf::from(path)));
                    }
                }
                _ => {}
            }
        }

        let mouse_down = window.get_mouse_down(MouseButton::Left);
        let pointer = window
            .get_mouse_pos(MouseMode::Discard)
            .and_then(|(x, y)| layout.to_canvas(x, y));
        events.extend(pointer_events(was_mouse_down, mouse_down, pointer, last_point));
        if pointer.is_some() {
            last_point = pointer;
        }
        was_mouse_down = mouse_down;

        for event in events {
            let mut pending = Some(event);
            while let Some(event) = pending.take() {
                match table.dispatch(&mut service, event) {
                    Ok(EventOutcome::TextRequested { x, y }) => {
                        let text = prompt_line("Enter your signature: ").unwrap_or_default();
                        pending = Some(PadEvent::TextEntered {
                            point: Point::new(x as f32, y as f32),
                            text,
                        });
                    }
                    Ok(EventOutcome::Exported { path, bytes }) => {
                        status = present_export(&path, bytes);
                    }
                    Ok(EventOutcome::Redraw | EventOutcome::Ignored) => {}
                    Err(error) => {
                        warn!(%error, "action failed");
                        status = error.to_string();
                    }
                }
            }
        }

        draw_frame(&mut frame, &layout, &service, &status);
        window.set_title(&build_window_title(&service, &status));
        window
            .update_with_buffer(&frame, layout.window_width, layout.window_height)
            .map_err(|error| format!("failed to update UI window: {error}"))?;
    }

    Ok(())
}

/// Translates raw mouse state into pad events. A release over the canvas is
/// also a click.
fn pointer_events(
    was_down: bool,
    is_down: bool,
    pointer: Option<Point>,
    last_point: Option<Point>,
) -> Vec<PadEvent> {
    let mut events = Vec::new();
    match (was_down, is_down) {
        (false, true) => {
            if let Some(point) = pointer {
                events.push(PadEvent::PointerDown(point));
            }
        }
        (true, true) => {
            if let Some(point) = pointer.filter(|point| Some(*point) != last_point) {
                events.push(PadEvent::PointerMove(point));
            }
        }
        (true, false) => {
            events.push(PadEvent::PointerUp);
            if let Some(point) = pointer {
                events.push(PadEvent::Click(point));
            }
        }
        (false, false) => {
            if let Some(point) = pointer.filter(|point| Some(*point) != last_point) {
                events.push(PadEvent::PointerMove(point));
            }
        }
    }
    events
}

fn prompt_line(label: &str) -> Option<String> {
    print!("{label}");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).ok()?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

fn draw_frame(frame: &mut [u32], layout: &Layout, service: &SignaturePadService, status: &str) {
    let width = layout.window_width;
    frame.fill(CHROME_COLOR);
    draw_header(frame, width, service);

    let session = service.session();
    draw_rect(
        frame,
        width,
        layout.canvas_left - 1,
        layout.canvas_top - 1,
        layout.canvas_width + 2,
        layout.canvas_height + 2,
        0xC8B89F,
    );
    composite_canvas(frame, layout, service.canvas(), session.background);

    let footer_y = layout.canvas_top + layout.canvas_height + 16;
    draw_text(frame, width, CANVAS_MARGIN, footer_y, status, 0xDDDDDD);
}

fn draw_header(frame: &mut [u32], width: usize, service: &SignaturePadService) {
    let left = CANVAS_MARGIN;
    let band_width = width.saturating_sub(2 * CANVAS_MARGIN);
    fill_rect(frame, width, left, HEADER_TOP, band_width, HEADER_HEIGHT, 0xFFFDF8);
    draw_rect(frame, width, left, HEADER_TOP, band_width, HEADER_HEIGHT, 0xCCBBA4);

    let session = service.session();
    let swatch_top = HEADER_TOP + 8;
    let swatch = HEADER_HEIGHT - 16;
    fill_rect(frame, width, left + 8, swatch_top, swatch, swatch, session.ink.to_u32());
    fill_rect(
        frame,
        width,
        left + 16 + swatch,
        swatch_top,
        swatch,
        swatch,
        session.background.to_u32(),
    );
    draw_rect(frame, width, left + 16 + swatch, swatch_top, swatch, swatch, 0x1B1F26);

    let mode = if session.text_armed { "TEXT: CLICK" } else { "DRAW" };
    draw_text(
        frame,
        width,
        left + 28 + 2 * swatch,
        HEADER_TOP + 16,
        &format!("{mode}  C clear S save F filter T text U upload I ink B bg"),
        0x1B1F26,
    );
}

/// Draws the canvas over its background color, as the page showed it.
fn composite_canvas(frame: &mut [u32], layout: &Layout, canvas: &PixelBuffer, background: Rgba) {
    let [bg_r, bg_g, bg_b, _] = background.0;
    for (row, samples) in canvas.as_raw().chunks_exact(canvas.stride().max(1)).enumerate() {
        for (col, sample) in samples.chunks_exact(4).enumerate() {
            let alpha = u32::from(sample[3]);
            let mix = |src: u8, dst: u8| {
                (u32::from(src) * alpha + u32::from(dst) * (255 - alpha) + 127) / 255
            };
            let color =
                (mix(sample[0], bg_r) << 16) | (mix(sample[1], bg_g) << 8) | mix(sample[2], bg_b);
            set_pixel(
                frame,
                layout.window_width,
                layout.canvas_left + col,
                layout.canvas_top + row,
                color,
            );
        }
    }
}

fn fill_rect(frame: &mut [u32], width: usize, left: usize, top: usize, w: usize, h: usize, color: u32) {
    for y in top..top.saturating_add(h) {
        for x in left..left.saturating_add(w) {
            set_pixel(frame, width, x, y, color);
        }
    }
}

fn draw_rect(frame: &mut [u32], width: usize, left: usize, top: usize, w: usize, h: usize, color: u32) {
    if w == 0 || h == 0 {
        return;
    }
    let right = left + w - 1;
    let bottom = top + h - 1;
    for x in left..=right {
        set_pixel(frame, width, x, top, color);
        set_pixel(frame, width, x, bottom, color);
    }
    for y in top..=bottom {
        set_pixel(frame, width, left, y, color);
        set_pixel(frame, width, right, y, color);
    }
}

fn set_pixel(frame: &mut [u32], width: usize, x: usize, y: usize, color: u32) {
    let height = frame.len() / width;
    if x < width && y < height {
        frame[y * width + x] = color;
    }
}

fn draw_text(frame: &mut [u32], width: usize, x: usize, y: usize, text: &str, color: u32) {
    use font8x8::UnicodeFonts;

    let mut cursor_x = x;
    for ch in text.chars().filter(|ch| *ch != '\n') {
        let glyph = font8x8::BASIC_FONTS.get(ch).unwrap_or([0; 8]);
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..8 {
                if (bits >> col) & 1 == 1 {
                    set_pixel(frame, width, cursor_x + col, y + row, color);
                }
            }
        }
        cursor_x = cursor_x.saturating_add(8);
    }
}

fn build_window_title(service: &SignaturePadService, status: &str) -> String {
    let session = service.session();
    format!(
        "inkpad | {}x{} | ink={} | bg={} | {} | {} | esc quit",
        service.canvas().width(),
        service.canvas().height(),
        session.ink,
        session.background,
        if session.drawing { "drawing" } else { "idle" },
        status
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        Layout::for_canvas(&PixelBuffer::blank(100, 50).expect("canvas"))
    }

    #[test]
    fn window_wraps_canvas_with_chrome() {
        let layout = layout();
        assert_eq!(layout.window_width, 100 + 2 * CANVAS_MARGIN);
        assert_eq!(layout.window_height, CANVAS_TOP + 50 + FOOTER_HEIGHT);
    }

    #[test]
    fn mouse_maps_into_canvas_space() {
        let layout = layout();
        let inside = layout.to_canvas((CANVAS_MARGIN + 10) as f32, (CANVAS_TOP + 5) as f32);
        assert_eq!(inside, Some(Point::new(10.0, 5.0)));
        assert_eq!(layout.to_canvas(2.0, 2.0), None);
        assert_eq!(
            layout.to_canvas((CANVAS_MARGIN + 100) as f32, (CANVAS_TOP + 5) as f32),
            None
        );
    }

    #[test]
    fn press_drag_release_produces_stroke_events() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(2.0, 1.0);
        assert_eq!(pointer_events(false, true, Some(a), None), vec![PadEvent::PointerDown(a)]);
        assert_eq!(pointer_events(true, true, Some(b), Some(a)), vec![PadEvent::PointerMove(b)]);
        assert!(pointer_events(true, true, Some(b), Some(b)).is_empty());
        assert_eq!(
            pointer_events(true, false, Some(b), Some(b)),
            vec![PadEvent::PointerUp, PadEvent::Click(b)]
        );
        assert_eq!(pointer_events(true, false, None, Some(b)), vec![PadEvent::PointerUp]);
    }

    #[test]
    fn palettes_cycle_past_the_configured_default() {
        let mut palettes = Palettes::default();
        assert_eq!(palettes.next_ink(), "#1f3a93");
        for _ in 0..3 {
            palettes.next_ink();
        }
        assert_eq!(palettes.ink, 0);
        assert_eq!(palettes.next_background(), "#fdf6e3");
    }

    #[test]
    fn transparent_canvas_shows_background() {
        let layout = layout();
        let mut frame = vec![0_u32; layout.window_width * layout.window_height];
        let mut canvas = PixelBuffer::blank(100, 50).expect("canvas");
        canvas.set_pixel(3, 4, [255, 0, 0, 255]);
        composite_canvas(&mut frame, &layout, &canvas, Rgba::opaque(0, 0, 255));

        let at = |x: usize, y: usize| frame[(layout.canvas_top + y) * layout.window_width + layout.canvas_left + x];
        assert_eq!(at(0, 0), 0x0000FF);
        assert_eq!(at(3, 4), 0xFF0000);
    }
}
