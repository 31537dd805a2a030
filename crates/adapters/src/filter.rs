use inkpad_application::{ApplicationError, FilterEngine};
use inkpad_domain::filter::filter_samples;
use inkpad_domain::{apply_filter, FilterParams, PixelBuffer};
use rayon::prelude::*;
use tracing::debug;

#[derive(Debug, Default)]
pub struct SequentialFilterEngine;

impl FilterEngine for SequentialFilterEngine {
    fn apply(
        &self,
        buffer: &mut PixelBuffer,
        params: &FilterParams,
    ) -> Result<(), ApplicationError> {
        params.validate()?;
        apply_filter(buffer, params);
        Ok(())
    }
}

/// Filters row bands on the rayon pool once a buffer is large enough to be
/// worth splitting.
#[derive(Debug)]
pub struct ParallelFilterEngine {
    min_parallel_pixels: usize,
}

impl ParallelFilterEngine {
    pub fn new(min_parallel_pixels: usize) -> Self {
        Self {
            min_parallel_pixels,
        }
    }
}

impl Default for ParallelFilterEngine {
    fn default() -> Self {
        Self::new(65_536)
    }
}

impl FilterEngine for ParallelFilterEngine {
    fn apply(
        &self,
        buffer: &mut PixelBuffer,
        params: &FilterParams,
    ) -> Result<(), ApplicationError> {
        params.validate()?;
        let stride = buffer.stride();
        if stride == 0 || buffer.is_empty() {
            return Ok(());
        }
        if buffer.pixel_count() < self.min_parallel_pixels {
            apply_filter(buffer, params);
            return Ok(());
        }

        let height = buffer.height() as usize;
        let threads = rayon::current_num_threads().max(1);
        let band_rows = height.div_ceil(threads).max(1);
        debug!(height, band_rows, threads, "filtering in parallel bands");
        buffer
            .as_raw_mut()
            .par_chunks_mut(stride * band_rows)
            .for_each(|band| filter_samples(band, params));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noisy_buffer(width: u32, height: u32) -> PixelBuffer {
        let data = (0..width * height * 4)
            .map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8)
            .collect();
        PixelBuffer::new(width, height, data).expect("buffer")
    }

    #[test]
    fn parallel_matches_sequential() {
        let mut sequential = noisy_buffer(37, 23);
        let mut parallel = sequential.clone();
        let params = FilterParams::default();

        SequentialFilterEngine
            .apply(&mut sequential, &params)
            .expect("sequential");
        ParallelFilterEngine::new(0)
            .apply(&mut parallel, &params)
            .expect("parallel");
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn small_buffers_take_the_sequential_path() {
        let mut expected = noisy_buffer(4, 4);
        let mut actual = expected.clone();
        apply_filter(&mut expected, &FilterParams::default());
        ParallelFilterEngine::default()
            .apply(&mut actual, &FilterParams::default())
            .expect("filter");
        assert_eq!(expected, actual);
    }

    #[test]
    fn empty_buffer_is_accepted() {
        let mut buffer = PixelBuffer::new(0, 5, Vec::new()).expect("empty");
        ParallelFilterEngine::new(0)
            .apply(&mut buffer, &FilterParams::default())
            .expect("filter");
        assert!(buffer.is_empty());
    }

    #[test]
    fn bad_params_leave_buffer_untouched() {
        let mut buffer = noisy_buffer(8, 8);
        let before = buffer.clone();
        let params = FilterParams {
            brightness: f64::NAN,
            ..FilterParams::default()
        };
        assert!(ParallelFilterEngine::new(0).apply(&mut buffer, &params).is_err());
        assert!(SequentialFilterEngine.apply(&mut buffer, &params).is_err());
        assert_eq!(buffer, before);
    }
}
