use crate::{round_to, PixelBuffer, ScoreOutcome, SentimentError, SubScore};
use palette::{FromColor, Hsv, Srgb};
use tracing::{debug, warn};

/// Taller images are sampled on a stride so at most this many rows are read.
const MAX_SAMPLED_ROWS: u32 = 200;
/// Every n-th sampled pixel is converted to HSV.
const HSV_SAMPLE_STRIDE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
struct ColorStats {
    avg_red: f64,
    avg_green: f64,
    avg_blue: f64,
    saturation: f64,
    value: f64,
}

/// Sentiment contribution from color warmth, green dominance, saturation and HSV value.
#[must_use]
pub fn score_color(pixels: &PixelBuffer) -> ScoreOutcome {
    let outcome = ScoreOutcome::from_result(try_score_color(pixels));
    match outcome.reason() {
        Some(reason) => warn!("Color analysis degraded: {reason}"),
        None => debug!("Color score: {}", outcome.score()),
    }
    outcome
}

fn try_score_color(pixels: &PixelBuffer) -> Result<SubScore, SentimentError> {
    pixels.ensure_not_empty()?;
    let stats = color_stats(pixels);

    let mut score = 0.0;
    let mut notes = vec![];

    let warmth = (stats.avg_red - stats.avg_blue) / 255.0;
    if warmth > 0.1 {
        score += 0.3;
        notes.push("Warm colors (energetic)".to_string());
    } else if warmth < -0.1 {
        score -= 0.2;
        notes.push("Cool colors (calm)".to_string());
    }

    if stats.avg_green > stats.avg_red.max(stats.avg_blue) && stats.avg_green > 100.0 {
        score += 0.4;
        notes.push("Green dominant (natural/relaxing)".to_string());
    }

    if stats.saturation > 0.6 {
        score += 0.2;
        notes.push("High saturation (vibrant)".to_string());
    } else if stats.saturation < 0.3 {
        score -= 0.1;
        notes.push("Low saturation (subtle)".to_string());
    }

    if stats.value > 0.7 {
        score += 0.2;
        notes.push("Bright image (positive)".to_string());
    } else if stats.value < 0.3 {
        score -= 0.3;
        notes.push("Dark image (somber)".to_string());
    }

    Ok(SubScore::new(score, notes)
        .with_metric("avg_red", round_to(stats.avg_red, 1))
        .with_metric("avg_green", round_to(stats.avg_green, 1))
        .with_metric("avg_blue", round_to(stats.avg_blue, 1))
        .with_metric("saturation", round_to(stats.saturation, 3))
        .with_metric("brightness", round_to(stats.value, 3)))
}

fn color_stats(pixels: &PixelBuffer) -> ColorStats {
    let step = if pixels.height() > MAX_SAMPLED_ROWS {
        (pixels.height() / MAX_SAMPLED_ROWS) as usize
    } else {
        1
    };

    let sampled: Vec<[u8; 3]> = (0..pixels.height())
        .step_by(step)
        .flat_map(|y| {
            (0..pixels.width())
                .step_by(step)
                .map(move |x| pixels.pixel(x, y))
        })
        .collect();

    let n = sampled.len() as f64;
    let (r_sum, g_sum, b_sum) = sampled.iter().fold((0.0, 0.0, 0.0), |(r, g, b), p| {
        (r + f64::from(p[0]), g + f64::from(p[1]), b + f64::from(p[2]))
    });

    let hsv: Vec<Hsv> = sampled
        .iter()
        .step_by(HSV_SAMPLE_STRIDE)
        .map(|[r, g, b]| {
            Hsv::from_color(Srgb::new(
                f32::from(*r) / 255.0,
                f32::from(*g) / 255.0,
                f32::from(*b) / 255.0,
            ))
        })
        .collect();
    let hsv_n = hsv.len() as f64;
    let saturation = hsv.iter().map(|c| f64::from(c.saturation)).sum::<f64>() / hsv_n;
    let value = hsv.iter().map(|c| f64::from(c.value)).sum::<f64>() / hsv_n;

    ColorStats {
        avg_red: r_sum / n,
        avg_green: g_sum / n,
        avg_blue: b_sum / n,
        saturation,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::Result;

    fn notes(outcome: &ScoreOutcome) -> Vec<&str> {
        outcome.sub_score().notes.iter().map(String::as_str).collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn black_image_is_dark_and_desaturated() {
        let outcome = score_color(&PixelBuffer::filled(10, 10, [0, 0, 0]));
        assert!(!outcome.is_degraded());
        assert_close(outcome.score(), -0.4);
        assert_eq!(
            notes(&outcome),
            vec!["Low saturation (subtle)", "Dark image (somber)"]
        );
        assert_eq!(outcome.sub_score().metric("brightness"), Some(0.0));
        assert_eq!(outcome.sub_score().metric("avg_red"), Some(0.0));
    }

    #[test]
    fn saturated_green_fires_green_rules() {
        let outcome = score_color(&PixelBuffer::filled(4, 4, [20, 200, 20]));
        // warmth 0, green dominant, saturation 0.9, value ~0.78
        assert_close(outcome.score(), 0.8);
        assert_eq!(
            notes(&outcome),
            vec![
                "Green dominant (natural/relaxing)",
                "High saturation (vibrant)",
                "Bright image (positive)"
            ]
        );
        assert_eq!(outcome.sub_score().metric("avg_green"), Some(200.0));
        assert_eq!(outcome.sub_score().metric("saturation"), Some(0.9));
    }

    #[test]
    fn warm_red_is_warm_vibrant_and_bright() {
        let outcome = score_color(&PixelBuffer::filled(3, 3, [255, 40, 0]));
        // warm + vibrant + bright = 0.7
        assert_close(outcome.score(), 0.7);
        assert_eq!(notes(&outcome)[0], "Warm colors (energetic)");
    }

    #[test]
    fn every_positive_rule_is_clamped_to_one() {
        // warm 0.3 + green 0.4 + vibrant 0.2 + bright 0.2 = 1.1
        let outcome = score_color(&PixelBuffer::filled(4, 4, [150, 220, 50]));
        assert_eq!(outcome.score(), 1.0);
        assert_eq!(
            notes(&outcome),
            vec![
                "Warm colors (energetic)",
                "Green dominant (natural/relaxing)",
                "High saturation (vibrant)",
                "Bright image (positive)",
            ]
        );
    }

    #[test]
    fn cool_blue_scores_negative_warmth() {
        let outcome = score_color(&PixelBuffer::filled(5, 5, [10, 30, 120]));
        assert_eq!(notes(&outcome)[0], "Cool colors (calm)");
        // cool -0.2, saturation 0.92 +0.2, value 0.47 no rule
        assert_close(outcome.score(), 0.0);
        assert!(!outcome.is_degraded());
    }

    #[test]
    fn single_pixel_buffer_is_scored() {
        let outcome = score_color(&PixelBuffer::filled(1, 1, [128, 128, 128]));
        assert!(!outcome.is_degraded());
        assert!((-1.0..=1.0).contains(&outcome.score()));
    }

    #[test]
    fn tall_images_are_subsampled_without_changing_uniform_result() {
        let small = score_color(&PixelBuffer::filled(8, 8, [200, 150, 90]));
        let large = score_color(&PixelBuffer::filled(300, 900, [200, 150, 90]));
        assert_eq!(small.sub_score(), large.sub_score());
    }

    #[test]
    fn empty_buffer_degrades() -> Result<()> {
        let outcome = score_color(&PixelBuffer::from_raw(0, 0, vec![])?);
        assert!(outcome.is_degraded());
        assert_eq!(outcome.score(), 0.0);
        assert!(matches!(
            outcome.reason(),
            Some(SentimentError::MalformedPixels(_))
        ));
        Ok(())
    }
}
