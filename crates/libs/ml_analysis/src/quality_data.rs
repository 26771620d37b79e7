use color_eyre::eyre::{Result, bail};
use common_types::QualityMetrics;
use image::{DynamicImage, GrayImage};
use imageproc::filter::{gaussian_blur_f32, laplacian_filter};
use visual_sentiment::round_to;

/// Sigma of OpenCV's automatic kernel for a 5x5 Gaussian.
const NOISE_BLUR_SIGMA: f32 = 1.1;

/// Technical quality measurements on the grayscale image.
pub fn get_quality_metrics(image: &DynamicImage) -> Result<QualityMetrics> {
    let gray = image.to_luma8();
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        bail!("Cannot measure quality of an empty image");
    }

    let sharpness = calculate_sharpness(&gray);
    let (brightness, contrast) = mean_and_std(gray.pixels().map(|p| f64::from(p[0])));
    let noise_level = calculate_noise(&gray);
    let quality_score = calculate_quality_score(sharpness, brightness, contrast, noise_level);

    Ok(QualityMetrics {
        sharpness,
        brightness,
        contrast,
        noise_level,
        quality_score,
        resolution: format!("{width}x{height}"),
        aspect_ratio: round_to(f64::from(width) / f64::from(height), 2),
    })
}

/// Population variance of the Laplacian response.
fn calculate_sharpness(gray: &GrayImage) -> f64 {
    let laplacian = laplacian_filter(gray);
    let (_, std) = mean_and_std(laplacian.pixels().map(|p| f64::from(p[0])));
    std * std
}

fn calculate_noise(gray: &GrayImage) -> f64 {
    let blurred = gaussian_blur_f32(gray, NOISE_BLUR_SIGMA);
    let n = f64::from(gray.width()) * f64::from(gray.height());
    let sum_diff: f64 = gray
        .pixels()
        .zip(blurred.pixels())
        .map(|(p1, p2)| (f64::from(p1[0]) - f64::from(p2[0])).abs())
        .sum();
    sum_diff / n
}

fn mean_and_std(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (n, sum, sum_sq) = values.fold((0.0, 0.0, 0.0), |(n, sum, sum_sq), v| {
        (n + 1.0, sum + v, sum_sq + v * v)
    });
    if n == 0.0 {
        return (0.0, 0.0);
    }
    let mean = sum / n;
    let variance = (sum_sq / n - mean * mean).max(0.0);
    (mean, variance.sqrt())
}

/// Weighted 0-100 score, one decimal.
fn calculate_quality_score(sharpness: f64, brightness: f64, contrast: f64, noise: f64) -> f64 {
    let sharpness_norm = (sharpness / 1000.0).min(1.0);
    let brightness_norm = 1.0 - (brightness - 127.5).abs() / 127.5;
    let contrast_norm = (contrast / 70.0).min(1.0);
    let noise_norm = (1.0 - noise / 20.0).max(0.0);

    let score = (sharpness_norm * 0.4
        + brightness_norm * 0.2
        + contrast_norm * 0.3
        + noise_norm * 0.1)
        * 100.0;
    round_to(score, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, RgbImage};

    #[test]
    fn flat_black_image_has_no_detail() -> Result<()> {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 16, Rgb([0, 0, 0])));
        let metrics = get_quality_metrics(&image)?;
        assert_eq!(metrics.sharpness, 0.0);
        assert_eq!(metrics.contrast, 0.0);
        assert_eq!(metrics.noise_level, 0.0);
        assert_eq!(metrics.brightness, 0.0);
        assert_eq!(metrics.resolution, "32x16");
        assert_eq!(metrics.aspect_ratio, 2.0);
        // only the noise term contributes
        assert_eq!(metrics.quality_score, 10.0);
        Ok(())
    }

    #[test]
    fn checkerboard_is_sharper_than_flat() -> Result<()> {
        let gray = GrayImage::from_fn(32, 32, |x, y| {
            if (x + y) % 2 == 0 { Luma([0]) } else { Luma([255]) }
        });
        let metrics = get_quality_metrics(&DynamicImage::ImageLuma8(gray))?;
        assert!(metrics.sharpness > 1000.0);
        assert!(metrics.contrast > 100.0);
        assert!(metrics.noise_level > 0.0);
        assert!((0.0..=100.0).contains(&metrics.quality_score));
        Ok(())
    }

    #[test]
    fn quality_score_saturates_each_term() {
        assert_eq!(calculate_quality_score(5000.0, 127.5, 140.0, 0.0), 100.0);
        assert_eq!(calculate_quality_score(0.0, 0.0, 0.0, 40.0), 0.0);
    }
}
