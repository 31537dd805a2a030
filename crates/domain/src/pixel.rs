use crate::DomainError;

pub const CHANNELS: usize = 4;

/// Row-major RGBA8 samples covering a `width` x `height` region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, DomainError> {
        check_shape(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A fully transparent buffer.
    pub fn blank(width: u32, height: u32) -> Result<Self, DomainError> {
        let len = byte_len(width, height)
            .ok_or(DomainError::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let offset = self.offset(x, y)?;
        let mut out = [0_u8; 4];
        out.copy_from_slice(&self.data[offset..offset + CHANNELS]);
        Some(out)
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if let Some(offset) = self.offset(x, y) {
            self.data[offset..offset + CHANNELS].copy_from_slice(&rgba);
        }
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * CHANNELS)
    }
}

pub(crate) fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(CHANNELS)
}

pub(crate) fn check_shape(width: u32, height: u32, len: usize) -> Result<(), DomainError> {
    let shape_error = DomainError::InvalidBufferShape { width, height, len };
    if len % CHANNELS != 0 {
        return Err(shape_error);
    }
    match byte_len(width, height) {
        Some(expected) if expected == len => Ok(()),
        _ => Err(shape_error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_mismatched_length() {
        assert!(matches!(
            PixelBuffer::new(2, 2, vec![0; 15]),
            Err(DomainError::InvalidBufferShape {
                width: 2,
                height: 2,
                len: 15
            })
        ));
        assert!(PixelBuffer::new(2, 2, vec![0; 12]).is_err());
        assert!(PixelBuffer::new(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn zero_sized_buffers_are_valid() {
        let buffer = PixelBuffer::new(0, 0, Vec::new()).expect("empty buffer");
        assert!(buffer.is_empty());
        assert_eq!(buffer.pixel_count(), 0);
        assert!(PixelBuffer::new(7, 0, Vec::new()).is_ok());
    }

    #[test]
    fn pixel_access_is_row_major_and_bounds_checked() {
        let mut buffer = PixelBuffer::blank(3, 2).expect("blank");
        buffer.set_pixel(2, 1, [1, 2, 3, 4]);
        assert_eq!(buffer.pixel(2, 1), Some([1, 2, 3, 4]));
        assert_eq!(&buffer.as_raw()[20..24], &[1, 2, 3, 4]);
        assert_eq!(buffer.pixel(3, 0), None);

        buffer.set_pixel(9, 9, [9, 9, 9, 9]);
        assert!(buffer.as_raw()[..20].iter().all(|byte| *byte == 0));
    }
}
