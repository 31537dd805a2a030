use serde::{Deserialize, Serialize};

use crate::pixel::{check_shape, CHANNELS};
use crate::{DomainError, PixelBuffer};

const MIDPOINT: f64 = 128.0;
const CHANNEL_MAX: f64 = 255.0;

/// Tuning constants for the enhancement pipeline.
///
/// The pipeline always runs brightness, then contrast, then saturation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterParams {
    /// Added to each of R, G, B.
    pub brightness: f64,
    /// Scales each channel around the 128 midpoint.
    pub contrast: f64,
    /// Scales HSL saturation. Not clamped.
    pub saturation: f64,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            brightness: 40.0,
            contrast: 1.2,
            saturation: 1.5,
        }
    }
}

impl FilterParams {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.brightness.is_finite() {
            return Err(DomainError::NonFiniteFilterParam("brightness"));
        }
        if !self.contrast.is_finite() {
            return Err(DomainError::NonFiniteFilterParam("contrast"));
        }
        if !self.saturation.is_finite() {
            return Err(DomainError::NonFiniteFilterParam("saturation"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Filters every pixel of `buffer` in place. Alpha is left untouched.
pub fn apply_filter(buffer: &mut PixelBuffer, params: &FilterParams) {
    filter_samples(buffer.as_raw_mut(), params);
}

/// Raw-slice entry point. The shape and parameters are checked before any
/// byte is written, so a rejected call leaves `data` as it was.
pub fn apply_filter_to_rgba(
    data: &mut [u8],
    width: u32,
    height: u32,
    params: &FilterParams,
) -> Result<(), DomainError> {
    check_shape(width, height, data.len())?;
    params.validate()?;
    filter_samples(data, params);
    Ok(())
}

/// Filters a run of whole RGBA samples. Trailing bytes that do not form a
/// full sample are ignored; callers validate the shape first.
pub fn filter_samples(data: &mut [u8], params: &FilterParams) {
    for sample in data.chunks_exact_mut(CHANNELS) {
        let rgb = [
            f64::from(sample[0]),
            f64::from(sample[1]),
            f64::from(sample[2]),
        ];
        let [r, g, b] = filter_rgb(rgb, params);
        sample[0] = to_channel(r);
        sample[1] = to_channel(g);
        sample[2] = to_channel(b);
    }
}

/// The full per-pixel pipeline on unclamped channel values in the 0..=255
/// scale. Out-of-range inputs are accepted as-is.
pub fn filter_rgb(rgb: [f64; 3], params: &FilterParams) -> [f64; 3] {
    let [r, g, b] = brightness_contrast(rgb, params);
    let mut hsl = rgb_to_hsl(r / CHANNEL_MAX, g / CHANNEL_MAX, b / CHANNEL_MAX);
    hsl.s *= params.saturation;
    let [r, g, b] = hsl_to_rgb(hsl);
    [r * CHANNEL_MAX, g * CHANNEL_MAX, b * CHANNEL_MAX]
}

pub fn brightness_contrast(rgb: [f64; 3], params: &FilterParams) -> [f64; 3] {
    rgb.map(|channel| (channel + params.brightness - MIDPOINT) * params.contrast + MIDPOINT)
}

pub fn rgb_to_hsl(r: f64, g: f64, b: f64) -> Hsl {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl { h: h / 6.0, s, l }
}

pub fn hsl_to_rgb(hsl: Hsl) -> [f64; 3] {
    let Hsl { h, s, l } = hsl;
    if s == 0.0 {
        return [l, l, l];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    ]
}

pub fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let mut t = t;
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

/// Write-back into 8-bit storage: round half to even, clamp, NaN becomes 0.
pub fn to_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round_ties_even().clamp(0.0, CHANNEL_MAX) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(rgba: [u8; 4]) -> PixelBuffer {
        PixelBuffer::new(1, 1, rgba.to_vec()).expect("1x1 buffer")
    }

    #[test]
    fn default_params_match_reference_constants() {
        let params = FilterParams::default();
        assert_eq!(params.brightness, 40.0);
        assert_eq!(params.contrast, 1.2);
        assert_eq!(params.saturation, 1.5);
    }

    #[test]
    fn validate_rejects_non_finite_values() {
        let params = FilterParams {
            contrast: f64::INFINITY,
            ..FilterParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(DomainError::NonFiniteFilterParam("contrast"))
        ));
    }

    #[test]
    fn mid_gray_known_value() {
        let params = FilterParams::default();
        let adjusted = brightness_contrast([100.0; 3], &params);
        for channel in adjusted {
            assert!((channel - 142.4).abs() < 1e-3);
        }

        let hsl = rgb_to_hsl(adjusted[0] / 255.0, adjusted[1] / 255.0, adjusted[2] / 255.0);
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
        assert!((hsl.l - 0.5584).abs() < 1e-3);

        for channel in filter_rgb([100.0; 3], &params) {
            assert!((channel - 142.4).abs() < 1e-3);
        }

        let mut buffer = single([100, 100, 100, 255]);
        apply_filter(&mut buffer, &params);
        assert_eq!(buffer.pixel(0, 0), Some([142, 142, 142, 255]));
    }

    #[test]
    fn grays_stay_gray() {
        let params = FilterParams::default();
        let data: Vec<u8> = (0..=255_u8).flat_map(|v| [v, v, v, 200]).collect();
        let mut buffer = PixelBuffer::new(256, 1, data).expect("gray ramp");
        apply_filter(&mut buffer, &params);
        for sample in buffer.as_raw().chunks_exact(4) {
            assert_eq!(sample[0], sample[1]);
            assert_eq!(sample[1], sample[2]);
            assert_eq!(sample[3], 200);
        }
        assert_eq!(buffer.pixel(0, 0), Some([22, 22, 22, 200]));
        assert_eq!(buffer.pixel(255, 0), Some([255, 255, 255, 200]));
    }

    #[test]
    fn saturation_widens_channel_spread() {
        let params = FilterParams::default();
        let before = brightness_contrast([200.0, 100.0, 100.0], &params);
        let after = filter_rgb([200.0, 100.0, 100.0], &params);
        let spread = |rgb: [f64; 3]| {
            rgb.iter().copied().fold(f64::MIN, f64::max) - rgb.iter().copied().fold(f64::MAX, f64::min)
        };
        assert!(spread(after) > spread(before));

        let mut buffer = single([200, 100, 100, 17]);
        apply_filter(&mut buffer, &params);
        assert_eq!(buffer.pixel(0, 0), Some([255, 112, 112, 17]));
    }

    #[test]
    fn near_half_way_channels_use_double_precision() {
        let params = FilterParams::default();
        let [r, g, _] = filter_rgb([0.0, 0.0, 3.0], &params);
        assert!((r - 21.5).abs() < 1e-9);
        assert!((g - 21.5).abs() < 1e-9);

        let data = vec![0, 0, 3, 255, 0, 0, 13, 255];
        let mut buffer = PixelBuffer::new(2, 1, data).expect("two pixels");
        apply_filter(&mut buffer, &params);
        assert_eq!(buffer.pixel(0, 0), Some([22, 22, 27, 255]));
        assert_eq!(buffer.pixel(1, 0), Some([19, 19, 42, 255]));
    }

    #[test]
    fn alpha_and_shape_are_preserved() {
        let data: Vec<u8> = (0..6 * 4 * 4).map(|i| (i * 37 % 256) as u8).collect();
        let mut buffer = PixelBuffer::new(6, 4, data.clone()).expect("buffer");
        apply_filter(&mut buffer, &FilterParams::default());
        assert_eq!(buffer.width(), 6);
        assert_eq!(buffer.height(), 4);
        assert_eq!(buffer.as_raw().len(), data.len());
        for (out, input) in buffer.as_raw().chunks_exact(4).zip(data.chunks_exact(4)) {
            assert_eq!(out[3], input[3]);
        }
    }

    #[test]
    fn filtering_is_deterministic() {
        let data: Vec<u8> = (0..64 * 4).map(|i| (i * 91 % 256) as u8).collect();
        let mut first = PixelBuffer::new(8, 8, data.clone()).expect("buffer");
        let mut second = PixelBuffer::new(8, 8, data).expect("buffer");
        apply_filter(&mut first, &FilterParams::default());
        apply_filter(&mut second, &FilterParams::default());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_buffer_is_a_noop() {
        let mut buffer = PixelBuffer::new(0, 0, Vec::new()).expect("empty");
        apply_filter(&mut buffer, &FilterParams::default());
        assert!(buffer.is_empty());

        let mut raw: Vec<u8> = Vec::new();
        apply_filter_to_rgba(&mut raw, 0, 0, &FilterParams::default()).expect("empty slice");
    }

    #[test]
    fn malformed_slice_is_rejected_untouched() {
        let mut data = vec![10_u8, 20, 30, 40, 50, 60, 70];
        let result = apply_filter_to_rgba(&mut data, 1, 1, &FilterParams::default());
        assert!(matches!(result, Err(DomainError::InvalidBufferShape { len: 7, .. })));
        assert_eq!(data, vec![10, 20, 30, 40, 50, 60, 70]);

        let mut data = vec![10_u8; 8];
        let result = apply_filter_to_rgba(&mut data, 3, 1, &FilterParams::default());
        assert!(result.is_err());
        assert_eq!(data, vec![10; 8]);
    }

    #[test]
    fn non_finite_params_are_rejected_untouched() {
        let mut data = vec![10_u8, 20, 30, 40];
        let params = FilterParams {
            saturation: f64::NAN,
            ..FilterParams::default()
        };
        assert!(apply_filter_to_rgba(&mut data, 1, 1, &params).is_err());
        assert_eq!(data, vec![10, 20, 30, 40]);
    }

    #[test]
    fn hue_follows_the_max_channel() {
        let red = rgb_to_hsl(1.0, 0.0, 0.0);
        assert_eq!(red.h, 0.0);
        assert_eq!(red.s, 1.0);
        assert_eq!(red.l, 0.5);

        let green = rgb_to_hsl(0.0, 1.0, 0.0);
        assert!((green.h - 1.0 / 3.0).abs() < 1e-6);

        let blue = rgb_to_hsl(0.0, 0.0, 1.0);
        assert!((blue.h - 2.0 / 3.0).abs() < 1e-6);

        let magenta_ish = rgb_to_hsl(1.0, 0.0, 0.5);
        assert!((magenta_ish.h - (5.5 / 6.0)).abs() < 1e-6);
    }

    #[test]
    fn hsl_roundtrip_recovers_in_gamut_colors() {
        for rgb in [[0.2_f64, 0.4, 0.6], [0.9, 0.1, 0.3], [0.5, 0.5, 0.1]] {
            let back = hsl_to_rgb(rgb_to_hsl(rgb[0], rgb[1], rgb[2]));
            for (a, b) in rgb.iter().zip(back.iter()) {
                assert!((a - b).abs() < 1e-5, "{rgb:?} -> {back:?}");
            }
        }
    }

    #[test]
    fn write_back_clamps_and_rounds() {
        assert_eq!(to_channel(-12.0), 0);
        assert_eq!(to_channel(300.5), 255);
        assert_eq!(to_channel(142.4), 142);
        assert_eq!(to_channel(112.5), 112);
        assert_eq!(to_channel(113.5), 114);
        assert_eq!(to_channel(f64::NAN), 0);
    }

    #[test]
    fn params_deserialize_with_missing_fields() {
        let params: FilterParams =
            serde_json::from_str(r#"{"brightness": 10.0}"#).expect("partial params");
        assert_eq!(params.brightness, 10.0);
        assert_eq!(params.contrast, 1.2);
    }
}
