use font8x8::UnicodeFonts;
use inkpad_application::{ApplicationError, RasterizedText, TextRasterizer};
use inkpad_domain::CoverageMask;

const GLYPH_SIZE: u32 = 8;
/// Row of the 8x8 cell that sits on the baseline.
const GLYPH_BASELINE: u32 = 7;

/// Scales the 8x8 bitmap fonts up by whole pixels.
#[derive(Debug, Default)]
pub struct Font8x8Rasterizer;

impl TextRasterizer for Font8x8Rasterizer {
    fn rasterize(&self, text: &str, size_px: u32) -> Result<RasterizedText, ApplicationError> {
        if size_px == 0 {
            return Err(ApplicationError::InvalidInput(
                "text size must be non-zero".to_string(),
            ));
        }
        let scale = (size_px / GLYPH_SIZE).max(1);
        let cell = GLYPH_SIZE * scale;
        let glyphs: Vec<[u8; 8]> = text
            .chars()
            .filter(|ch| !ch.is_control())
            .map(glyph_for)
            .collect();

        let width = cell * glyphs.len() as u32;
        let height = cell;
        let mut coverage = vec![0_u8; (width * height) as usize];
        for (index, glyph) in glyphs.iter().enumerate() {
            let left = index as u32 * cell;
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH_SIZE {
                    if (bits >> col) & 1 == 0 {
                        continue;
                    }
                    let x0 = left + col * scale;
                    let y0 = row as u32 * scale;
                    for y in y0..y0 + scale {
                        let start = (y * width + x0) as usize;
                        coverage[start..start + scale as usize].fill(255);
                    }
                }
            }
        }

        Ok(RasterizedText {
            mask: CoverageMask {
                width,
                height,
                coverage,
            },
            baseline: GLYPH_BASELINE * scale,
        })
    }
}

fn glyph_for(ch: char) -> [u8; 8] {
    font8x8::BASIC_FONTS
        .get(ch)
        .or_else(|| font8x8::LATIN_FONTS.get(ch))
        .unwrap_or([0; 8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_scales_with_requested_size() {
        let text = Font8x8Rasterizer.rasterize("Ab", 48).expect("rasterize");
        assert_eq!(text.mask.width, 96);
        assert_eq!(text.mask.height, 48);
        assert_eq!(text.baseline, 42);
        assert!(text.mask.coverage.iter().any(|value| *value == 255));
    }

    #[test]
    fn spaces_take_room_but_no_ink() {
        let text = Font8x8Rasterizer.rasterize("  ", 8).expect("rasterize");
        assert_eq!(text.mask.width, 16);
        assert!(text.mask.coverage.iter().all(|value| *value == 0));
    }

    #[test]
    fn glyph_bits_map_left_to_right() {
        let text = Font8x8Rasterizer.rasterize("|", 8).expect("rasterize");
        let glyph = font8x8::BASIC_FONTS.get('|').expect("glyph");
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..8 {
                let expected = if (bits >> col) & 1 == 1 { 255 } else { 0 };
                assert_eq!(text.mask.get(col, row as u32), expected);
            }
        }
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            Font8x8Rasterizer.rasterize("x", 0),
            Err(ApplicationError::InvalidInput(_))
        ));
    }
}
