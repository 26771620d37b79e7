use crate::{round_to, ScoreOutcome, SubScore};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use utoipa::ToSchema;

/// Weights applied to the color, brightness and semantic sub-scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionWeights {
    pub color: f64,
    pub brightness: f64,
    pub semantic: f64,
}

pub const FUSION_WEIGHTS: FusionWeights = FusionWeights {
    color: 0.25,
    brightness: 0.25,
    semantic: 0.5,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    VeryNegative,
}

impl SentimentLabel {
    /// Buckets are closed on their lower edge, so a boundary value belongs to the higher bucket.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 0.5 => Self::VeryPositive,
            s if s >= 0.2 => Self::Positive,
            s if s >= -0.2 => Self::Neutral,
            s if s >= -0.5 => Self::Negative,
            _ => Self::VeryNegative,
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::VeryPositive => "Very Positive",
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
            Self::VeryNegative => "Very Negative",
        };
        f.write_str(text)
    }
}

/// Sub-scorer that fed the fusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SentimentComponent {
    Color,
    Brightness,
    Semantic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SentimentDetails {
    pub color_analysis: SubScore,
    pub brightness_analysis: SubScore,
    pub classification_analysis: SubScore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SentimentResult {
    pub sentiment: SentimentLabel,
    /// Rounded to 3 decimals.
    pub score: f64,
    pub details: SentimentDetails,
    /// Components that failed and contributed a neutral default.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<SentimentComponent>,
}

/// Weighted combination of the three sub-scores. Never fails: degraded inputs
/// take part in the arithmetic with their neutral default.
#[must_use]
pub fn fuse(
    color: ScoreOutcome,
    brightness: ScoreOutcome,
    semantic: ScoreOutcome,
) -> SentimentResult {
    let weights = FUSION_WEIGHTS;
    let raw = (color.score() * weights.color
        + brightness.score() * weights.brightness
        + semantic.score() * weights.semantic)
        .clamp(-1.0, 1.0);
    let sentiment = SentimentLabel::from_score(raw);
    info!("✅ Sentiment analyzed: {sentiment} (score: {raw:.3})");

    let degraded = [
        (SentimentComponent::Color, &color),
        (SentimentComponent::Brightness, &brightness),
        (SentimentComponent::Semantic, &semantic),
    ]
    .into_iter()
    .filter(|(_, outcome)| outcome.is_degraded())
    .map(|(component, _)| component)
    .collect();

    SentimentResult {
        sentiment,
        score: round_to(raw, 3),
        details: SentimentDetails {
            color_analysis: color.into_sub_score(),
            brightness_analysis: brightness.into_sub_score(),
            classification_analysis: semantic.into_sub_score(),
        },
        degraded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SentimentError;
    use rstest::rstest;

    fn scored(score: f64) -> ScoreOutcome {
        ScoreOutcome::Ok(SubScore::new(score, vec![]))
    }

    #[rstest]
    #[case(1.0, SentimentLabel::VeryPositive)]
    #[case(0.5, SentimentLabel::VeryPositive)]
    #[case(0.499, SentimentLabel::Positive)]
    #[case(0.2, SentimentLabel::Positive)]
    #[case(0.199, SentimentLabel::Neutral)]
    #[case(0.0, SentimentLabel::Neutral)]
    #[case(-0.2, SentimentLabel::Neutral)]
    #[case(-0.201, SentimentLabel::Negative)]
    #[case(-0.5, SentimentLabel::Negative)]
    #[case(-0.501, SentimentLabel::VeryNegative)]
    #[case(-1.0, SentimentLabel::VeryNegative)]
    fn labels_follow_inclusive_lower_bounds(#[case] score: f64, #[case] expected: SentimentLabel) {
        assert_eq!(SentimentLabel::from_score(score), expected);
    }

    #[test]
    fn label_is_total_over_range() {
        for i in -1000..=1000 {
            let score = f64::from(i) / 1000.0;
            let label = SentimentLabel::from_score(score);
            let expected = if score >= 0.5 {
                SentimentLabel::VeryPositive
            } else if score >= 0.2 {
                SentimentLabel::Positive
            } else if score >= -0.2 {
                SentimentLabel::Neutral
            } else if score >= -0.5 {
                SentimentLabel::Negative
            } else {
                SentimentLabel::VeryNegative
            };
            assert_eq!(label, expected, "score {score}");
        }
    }

    #[rstest]
    #[case(0.0, 0.0, 1.0, SentimentLabel::VeryPositive, 0.5)]
    #[case(0.8, 0.0, 0.0, SentimentLabel::Positive, 0.2)]
    #[case(0.0, 0.0, -0.4, SentimentLabel::Neutral, -0.2)]
    #[case(0.0, 0.0, -1.0, SentimentLabel::Negative, -0.5)]
    fn fused_boundaries_land_in_higher_bucket(
        #[case] color: f64,
        #[case] brightness: f64,
        #[case] semantic: f64,
        #[case] label: SentimentLabel,
        #[case] score: f64,
    ) {
        let result = fuse(scored(color), scored(brightness), scored(semantic));
        assert_eq!(result.sentiment, label);
        assert_eq!(result.score, score);
    }

    #[test]
    fn all_zero_is_neutral() {
        let result = fuse(scored(0.0), scored(0.0), scored(0.0));
        assert_eq!(result.sentiment, SentimentLabel::Neutral);
        assert_eq!(result.score, 0.0);
        assert!(result.degraded.is_empty());
    }

    #[test]
    fn mixed_signals_weight_semantics_double() {
        // 0.2 + 0.2 - 0.45
        let result = fuse(scored(0.8), scored(0.8), scored(-0.9));
        assert_eq!(result.score, -0.05);
        assert_eq!(result.sentiment, SentimentLabel::Neutral);

        let result = fuse(scored(0.8), scored(0.8), scored(0.0));
        assert_eq!(result.score, 0.4);
        assert_eq!(result.sentiment, SentimentLabel::Positive);
    }

    #[test]
    fn extremes_stay_in_range() {
        let result = fuse(scored(-1.0), scored(-1.0), scored(-1.0));
        assert_eq!(result.score, -1.0);
        assert_eq!(result.sentiment, SentimentLabel::VeryNegative);
    }

    #[test]
    fn degraded_components_are_listed_and_neutral() {
        let result = fuse(
            scored(0.4),
            ScoreOutcome::degraded(SentimentError::MalformedPixels("empty".to_string())),
            ScoreOutcome::degraded(SentimentError::InputUnavailable("caption")),
        );
        assert_eq!(result.score, 0.1);
        assert_eq!(
            result.degraded,
            vec![SentimentComponent::Brightness, SentimentComponent::Semantic]
        );
        assert_eq!(
            result.details.classification_analysis.error.as_deref(),
            Some("caption not available")
        );
    }

    #[test]
    fn details_carry_inputs_verbatim() {
        let color = SubScore::new(0.3, vec!["Warm colors (energetic)".to_string()])
            .with_metric("avg_red", 200.0);
        let result = fuse(ScoreOutcome::Ok(color.clone()), scored(0.0), scored(0.0));
        assert_eq!(result.details.color_analysis, color);
    }

    #[test]
    fn fusion_is_idempotent() -> color_eyre::Result<()> {
        let run = || fuse(scored(0.3), scored(-0.2), scored(0.7));
        let first = serde_json::to_string(&run())?;
        let second = serde_json::to_string(&run())?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn serializes_service_shape() -> color_eyre::Result<()> {
        let result = fuse(scored(0.0), scored(0.0), scored(1.0));
        let json = serde_json::to_value(&result)?;
        assert_eq!(json["sentiment"], "very_positive");
        assert_eq!(json["score"], 0.5);
        assert!(json["details"]["color_analysis"].is_object());
        assert!(json["details"]["brightness_analysis"].is_object());
        assert!(json["details"]["classification_analysis"].is_object());
        assert!(json.get("degraded").is_none());
        Ok(())
    }
}
