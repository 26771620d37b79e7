use crate::{round_to, PixelBuffer, ScoreOutcome, SentimentError, SubScore};
use tracing::{debug, warn};

/// Sentiment contribution from global brightness and contrast of the luma channel.
#[must_use]
pub fn score_brightness(pixels: &PixelBuffer) -> ScoreOutcome {
    let outcome = ScoreOutcome::from_result(try_score_brightness(pixels));
    match outcome.reason() {
        Some(reason) => warn!("Brightness analysis degraded: {reason}"),
        None => debug!("Brightness score: {}", outcome.score()),
    }
    outcome
}

fn try_score_brightness(pixels: &PixelBuffer) -> Result<SubScore, SentimentError> {
    pixels.ensure_not_empty()?;
    let (brightness, contrast) = mean_and_std(pixels);

    let mut score = 0.0;
    let mut notes = vec![];

    if (80.0..=180.0).contains(&brightness) {
        score += 0.3;
        notes.push("Balanced brightness".to_string());
    } else if brightness < 60.0 {
        score -= 0.4;
        notes.push("Too dark (melancholic)".to_string());
    } else if brightness > 200.0 {
        score -= 0.2;
        notes.push("Too bright (possibly artificial)".to_string());
    }

    if (40.0..=80.0).contains(&contrast) {
        score += 0.2;
        notes.push("Good contrast (dynamic)".to_string());
    } else if contrast < 20.0 {
        score -= 0.2;
        notes.push("Low contrast (flat)".to_string());
    }

    Ok(SubScore::new(score, notes)
        .with_metric("brightness", round_to(brightness, 1))
        .with_metric("contrast", round_to(contrast, 1)))
}

/// Mean and population standard deviation of luma intensity on a 0-255 scale.
fn mean_and_std(pixels: &PixelBuffer) -> (f64, f64) {
    let luma = pixels.to_luma();
    let n = f64::from(luma.width()) * f64::from(luma.height());
    let (sum, sum_sq) = luma.pixels().fold((0.0, 0.0), |(sum, sum_sq), p| {
        let v = f64::from(p[0]);
        (sum + v, sum_sq + v * v)
    });
    let mean = sum / n;
    let variance = (sum_sq / n - mean * mean).max(0.0);
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::Result;

    fn checkerboard(width: u32, height: u32, dark: u8, light: u8) -> Result<PixelBuffer> {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = if (x + y) % 2 == 0 { dark } else { light };
                data.extend_from_slice(&[v, v, v]);
            }
        }
        Ok(PixelBuffer::from_raw(width, height, data)?)
    }

    #[test]
    fn black_image_is_dark_and_flat() {
        let outcome = score_brightness(&PixelBuffer::filled(16, 16, [0, 0, 0]));
        assert!((outcome.score() - -0.6).abs() < 1e-9);
        assert_eq!(
            outcome.sub_score().notes,
            vec!["Too dark (melancholic)", "Low contrast (flat)"]
        );
        assert_eq!(outcome.sub_score().metric("brightness"), Some(0.0));
        assert_eq!(outcome.sub_score().metric("contrast"), Some(0.0));
    }

    #[test]
    fn balanced_checkerboard_has_good_contrast() -> Result<()> {
        // mean 128, std 50
        let outcome = score_brightness(&checkerboard(8, 8, 78, 178)?);
        assert!((outcome.score() - 0.5).abs() < 1e-9);
        assert_eq!(
            outcome.sub_score().notes,
            vec!["Balanced brightness", "Good contrast (dynamic)"]
        );
        assert_eq!(outcome.sub_score().metric("brightness"), Some(128.0));
        assert_eq!(outcome.sub_score().metric("contrast"), Some(50.0));
        Ok(())
    }

    #[test]
    fn white_image_is_too_bright() {
        let outcome = score_brightness(&PixelBuffer::filled(4, 4, [255, 255, 255]));
        assert!((outcome.score() - -0.4).abs() < 1e-9);
        assert_eq!(
            outcome.sub_score().notes,
            vec!["Too bright (possibly artificial)", "Low contrast (flat)"]
        );
    }

    #[test]
    fn gap_between_thresholds_fires_nothing() {
        // brightness 70 sits between the dark and balanced bands, contrast 0 is flat
        let outcome = score_brightness(&PixelBuffer::filled(2, 2, [70, 70, 70]));
        assert_eq!(outcome.sub_score().notes, vec!["Low contrast (flat)"]);
        assert!((outcome.score() - -0.2).abs() < 1e-9);
    }

    #[test]
    fn single_row_does_not_divide_by_zero() {
        let outcome = score_brightness(&PixelBuffer::filled(7, 1, [120, 120, 120]));
        assert!(!outcome.is_degraded());
        assert!((-1.0..=1.0).contains(&outcome.score()));
    }

    #[test]
    fn single_pixel_buffer_is_scored() {
        let outcome = score_brightness(&PixelBuffer::filled(1, 1, [128, 128, 128]));
        assert!(!outcome.is_degraded());
        assert!((outcome.score() - 0.1).abs() < 1e-9);
        assert_eq!(outcome.sub_score().metric("contrast"), Some(0.0));
        assert_eq!(
            outcome.sub_score().notes,
            vec!["Balanced brightness", "Low contrast (flat)"]
        );
    }

    #[test]
    fn empty_buffer_degrades() -> Result<()> {
        let outcome = score_brightness(&PixelBuffer::from_raw(3, 0, vec![])?);
        assert!(outcome.is_degraded());
        assert_eq!(outcome.score(), 0.0);
        Ok(())
    }
}
