use std::path::Path;

use inkpad_domain::{FilterParams, PixelBuffer};

pub fn present_export(path: &Path, bytes: u64) -> String {
    format!("exported {} ({} bytes)", path.display(), bytes)
}

pub fn present_canvas(buffer: &PixelBuffer) -> String {
    let inked = buffer
        .as_raw()
        .chunks_exact(4)
        .filter(|sample| sample[3] > 0)
        .count();
    format!(
        "canvas {}x{} ({} of {} pixels inked)",
        buffer.width(),
        buffer.height(),
        inked,
        buffer.pixel_count()
    )
}

pub fn present_filter_params(params: &FilterParams) -> String {
    format!(
        "filter brightness={} contrast={} saturation={}",
        params.brightness, params.contrast, params.saturation
    )
}
