use crate::{PixelBuffer, Rgba};

pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Single-channel coverage, 0 = untouched, 255 = fully covered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageMask {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
}

impl CoverageMask {
    pub fn get(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.coverage[(y * self.width + x) as usize]
    }
}

pub fn clear(buffer: &mut PixelBuffer) {
    buffer.as_raw_mut().fill(0);
}

/// Round-capped line from `from` to `to`, antialiased over one pixel.
pub fn stroke_segment(buffer: &mut PixelBuffer, from: Point, to: Point, width: f32, color: Rgba) {
    if buffer.is_empty() || width <= 0.0 {
        return;
    }
    let radius = width / 2.0;
    let reach = radius + 1.0;
    let Some((x0, x1)) = span(from.x.min(to.x) - reach, from.x.max(to.x) + reach, buffer.width())
    else {
        return;
    };
    let Some((y0, y1)) = span(from.y.min(to.y) - reach, from.y.max(to.y) + reach, buffer.height())
    else {
        return;
    };

    for y in y0..y1 {
        for x in x0..x1 {
            let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            let distance = distance_to_segment(center, from, to);
            let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
            if coverage > 0.0 {
                blend_pixel(buffer, x, y, color, coverage);
            }
        }
    }
}

/// Paints `color` through `mask`, with the mask's top-left corner at `origin`.
pub fn stamp_mask(buffer: &mut PixelBuffer, mask: &CoverageMask, origin: Point, color: Rgba) {
    let left = origin.x.round() as i64;
    let top = origin.y.round() as i64;
    for my in 0..mask.height {
        let y = top + i64::from(my);
        if y < 0 || y >= i64::from(buffer.height()) {
            continue;
        }
        for mx in 0..mask.width {
            let x = left + i64::from(mx);
            if x < 0 || x >= i64::from(buffer.width()) {
                continue;
            }
            let coverage = mask.get(mx, my);
            if coverage > 0 {
                blend_pixel(buffer, x as u32, y as u32, color, f32::from(coverage) / 255.0);
            }
        }
    }
}

/// Replaces the whole of `dst` with `src` stretched to fit, nearest neighbour.
pub fn blit_stretched(dst: &mut PixelBuffer, src: &PixelBuffer) {
    clear(dst);
    let dst_width = dst.width();
    let dst_height = dst.height();
    let src_width = u64::from(src.width());
    let src_height = u64::from(src.height());
    if src_width == 0 || src_height == 0 {
        return;
    }

    for y in 0..dst_height {
        let src_y = (u64::from(y) * src_height / u64::from(dst_height)) as u32;
        for x in 0..dst_width {
            let src_x = (u64::from(x) * src_width / u64::from(dst_width)) as u32;
            if let Some(pixel) = src.pixel(src_x, src_y) {
                dst.set_pixel(x, y, pixel);
            }
        }
    }
}

/// Source-over compositing of `color` scaled by `coverage` onto one pixel.
pub fn blend_pixel(buffer: &mut PixelBuffer, x: u32, y: u32, color: Rgba, coverage: f32) {
    let Some(dst) = buffer.pixel(x, y) else {
        return;
    };
    let src_alpha = f32::from(color.alpha()) / 255.0 * coverage.clamp(0.0, 1.0);
    if src_alpha <= 0.0 {
        return;
    }
    let dst_alpha = f32::from(dst[3]) / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);

    let mut out = [0_u8; 4];
    for channel in 0..3 {
        let src_c = f32::from(color.0[channel]);
        let dst_c = f32::from(dst[channel]);
        let value = (src_c * src_alpha + dst_c * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        out[channel] = value.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    buffer.set_pixel(x, y, out);
}

fn span(low: f32, high: f32, limit: u32) -> Option<(u32, u32)> {
    let start = low.floor().max(0.0);
    let end = high.ceil().min(limit as f32);
    if start >= end {
        return None;
    }
    Some((start as u32, end as u32))
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let length_sq = dx * dx + dy * dy;
    let t = if length_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}
