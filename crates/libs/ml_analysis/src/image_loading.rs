use crate::AnalyzeError;
use color_eyre::eyre::Result;
use image::{DynamicImage, ImageFormat, imageops};
use std::io::Cursor;

/// Decodes uploaded bytes in any supported format.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, AnalyzeError> {
    let image = image::load_from_memory(bytes).map_err(|e| AnalyzeError::Decode(e.to_string()))?;
    if image.width() == 0 || image.height() == 0 {
        return Err(AnalyzeError::EmptyImage);
    }
    Ok(image)
}

/// Downscales so the long edge is at most `max_size` and encodes as JPEG for the models.
pub fn inference_jpeg(image: &DynamicImage, max_size: u32) -> Result<Vec<u8>> {
    let resized = resize_if_large(image, max_size);
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
    let mut buffer = Cursor::new(Vec::new());
    rgb.write_to(&mut buffer, ImageFormat::Jpeg)?;
    Ok(buffer.into_inner())
}

pub(crate) fn resize_if_large(img: &DynamicImage, max_dim: u32) -> DynamicImage {
    if img.width() > max_dim || img.height() > max_dim {
        img.resize(max_dim, max_dim, imageops::FilterType::Lanczos3)
    } else {
        img.clone()
    }
}
