use std::fs;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::io::Reader as ImageReader;
use image::{ColorType, ImageEncoder as _};
use inkpad_application::{ApplicationError, ImageDecoder, ImageEncoder};
use inkpad_domain::PixelBuffer;
use tracing::debug;

#[derive(Debug, Default)]
pub struct ImageCrateDecoder;

impl ImageDecoder for ImageCrateDecoder {
    fn decode_rgba(&self, path: &Path) -> Result<PixelBuffer, ApplicationError> {
        let image = ImageReader::open(path)
            .map_err(|error| ApplicationError::Io(error.to_string()))?
            .with_guessed_format()
            .map_err(|error| ApplicationError::Decode(error.to_string()))?
            .decode()
            .map_err(|error| ApplicationError::Decode(error.to_string()))?;

        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        debug!(path = %path.display(), width, height, "image decoded");
        Ok(PixelBuffer::new(width, height, rgba.into_raw())?)
    }
}

#[derive(Debug, Default)]
pub struct PngFileEncoder;

impl ImageEncoder for PngFileEncoder {
    fn encode_png(&self, buffer: &PixelBuffer) -> Result<Vec<u8>, ApplicationError> {
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(
                buffer.as_raw(),
                buffer.width(),
                buffer.height(),
                ColorType::Rgba8,
            )
            .map_err(|error| ApplicationError::Encode(error.to_string()))?;
        Ok(bytes)
    }

    fn write_png(&self, buffer: &PixelBuffer, path: &Path) -> Result<u64, ApplicationError> {
        let bytes = self.encode_png(buffer)?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| ApplicationError::Io(error.to_string()))?;
        }
        fs::write(path, &bytes).map_err(|error| ApplicationError::Io(error.to_string()))?;
        Ok(bytes.len() as u64)
    }
}
