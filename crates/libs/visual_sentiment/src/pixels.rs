use crate::SentimentError;
use image::{DynamicImage, GrayImage, Rgb, RgbImage};

/// Decoded RGB image owned by a single analysis request.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    image: RgbImage,
}

impl PixelBuffer {
    /// Wraps raw interleaved RGB bytes, row-major.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, SentimentError> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(SentimentError::MalformedPixels(format!(
                "expected {expected} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        RgbImage::from_raw(width, height, data)
            .map(|image| Self { image })
            .ok_or_else(|| SentimentError::MalformedPixels("buffer too small".to_string()))
    }

    /// Buffer where every pixel has the same color.
    #[must_use]
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, Rgb(rgb)),
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.image.width() == 0 || self.image.height() == 0
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.image.get_pixel(x, y).0
    }

    #[must_use]
    pub const fn as_rgb_image(&self) -> &RgbImage {
        &self.image
    }

    /// Single channel luma rendering of the buffer.
    #[must_use]
    pub fn to_luma(&self) -> GrayImage {
        image::imageops::grayscale(&self.image)
    }

    pub(crate) fn ensure_not_empty(&self) -> Result<(), SentimentError> {
        if self.is_empty() {
            return Err(SentimentError::MalformedPixels(format!(
                "image has no pixels ({}x{})",
                self.width(),
                self.height()
            )));
        }
        Ok(())
    }
}

impl From<RgbImage> for PixelBuffer {
    fn from(image: RgbImage) -> Self {
        Self { image }
    }
}

impl From<&DynamicImage> for PixelBuffer {
    fn from(image: &DynamicImage) -> Self {
        Self {
            image: image.to_rgb8(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_length() {
        let result = PixelBuffer::from_raw(2, 2, vec![0; 11]);
        assert!(matches!(result, Err(SentimentError::MalformedPixels(_))));
    }

    #[test]
    fn reads_pixels_row_major() -> color_eyre::Result<()> {
        let data = vec![1, 2, 3, 4, 5, 6];
        let buffer = PixelBuffer::from_raw(2, 1, data)?;
        assert_eq!(buffer.pixel(0, 0), [1, 2, 3]);
        assert_eq!(buffer.pixel(1, 0), [4, 5, 6]);
        Ok(())
    }

    #[test]
    fn zero_sized_buffer_is_empty() -> color_eyre::Result<()> {
        let buffer = PixelBuffer::from_raw(0, 0, vec![])?;
        assert!(buffer.is_empty());
        assert!(buffer.ensure_not_empty().is_err());
        Ok(())
    }
}
