use std::path::Path;

use inkpad_domain::{CoverageMask, FilterParams, PixelBuffer};

use crate::ApplicationError;

pub trait ImageDecoder {
    /// Decodes an image file at its native size as RGBA8.
    fn decode_rgba(&self, path: &Path) -> Result<PixelBuffer, ApplicationError>;
}

pub trait ImageEncoder {
    fn encode_png(&self, buffer: &PixelBuffer) -> Result<Vec<u8>, ApplicationError>;

    /// Writes the PNG encoding of `buffer` to `path`, returning the byte count.
    fn write_png(&self, buffer: &PixelBuffer, path: &Path) -> Result<u64, ApplicationError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterizedText {
    pub mask: CoverageMask,
    /// Rows from the top of the mask down to the text baseline.
    pub baseline: u32,
}

pub trait TextRasterizer {
    fn rasterize(&self, text: &str, size_px: u32) -> Result<RasterizedText, ApplicationError>;
}

pub trait FilterEngine {
    /// Filters `buffer` in place. Must leave it untouched when returning an error.
    fn apply(&self, buffer: &mut PixelBuffer, params: &FilterParams)
        -> Result<(), ApplicationError>;
}
