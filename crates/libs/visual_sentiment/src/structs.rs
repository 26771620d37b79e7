use crate::SentimentError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Bounded sentiment contribution of one signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SubScore {
    /// Always within `[-1, 1]`.
    pub score: f64,
    /// Explanations in rule-evaluation order.
    pub notes: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metrics: BTreeMap<String, f64>,
    /// Raw text inputs the score was derived from.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubScore {
    /// Clamps `raw_score` into `[-1, 1]`.
    #[must_use]
    pub fn new(raw_score: f64, notes: Vec<String>) -> Self {
        Self {
            score: raw_score.clamp(-1.0, 1.0),
            notes,
            metrics: BTreeMap::new(),
            inputs: BTreeMap::new(),
            error: None,
        }
    }

    #[must_use]
    pub fn with_metric(mut self, name: &str, value: f64) -> Self {
        self.metrics.insert(name.to_string(), value);
        self
    }

    #[must_use]
    pub fn with_input(mut self, name: &str, value: &str) -> Self {
        self.inputs.insert(name.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }
}

/// Result of a sub-scorer. `Degraded` means the scorer failed internally and
/// substituted a neutral score, which is distinct from a genuine 0.0.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    Ok(SubScore),
    Degraded {
        score: SubScore,
        reason: SentimentError,
    },
}

impl ScoreOutcome {
    #[must_use]
    pub fn degraded(reason: SentimentError) -> Self {
        let mut score = SubScore::new(0.0, vec![reason.to_string()]);
        score.error = Some(reason.to_string());
        Self::Degraded { score, reason }
    }

    #[must_use]
    pub fn from_result(result: Result<SubScore, SentimentError>) -> Self {
        match result {
            Ok(score) => Self::Ok(score),
            Err(reason) => Self::degraded(reason),
        }
    }

    #[must_use]
    pub const fn sub_score(&self) -> &SubScore {
        match self {
            Self::Ok(score) | Self::Degraded { score, .. } => score,
        }
    }

    #[must_use]
    pub const fn score(&self) -> f64 {
        self.sub_score().score
    }

    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    #[must_use]
    pub const fn reason(&self) -> Option<&SentimentError> {
        match self {
            Self::Ok(_) => None,
            Self::Degraded { reason, .. } => Some(reason),
        }
    }

    #[must_use]
    pub fn into_sub_score(self) -> SubScore {
        match self {
            Self::Ok(score) | Self::Degraded { score, .. } => score,
        }
    }
}

/// Round half away from zero to `decimals` places.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_into_range() {
        assert_eq!(SubScore::new(1.5, vec![]).score, 1.0);
        assert_eq!(SubScore::new(-3.0, vec![]).score, -1.0);
        assert_eq!(SubScore::new(0.25, vec![]).score, 0.25);
    }

    #[test]
    fn degraded_is_neutral_with_reason() {
        let outcome = ScoreOutcome::degraded(SentimentError::InputUnavailable("caption"));
        assert!(outcome.is_degraded());
        assert_eq!(outcome.score(), 0.0);
        assert_eq!(outcome.sub_score().notes, vec!["caption not available"]);
        assert_eq!(
            outcome.sub_score().error.as_deref(),
            Some("caption not available")
        );
    }

    #[test]
    fn genuine_neutral_is_not_degraded() {
        let outcome = ScoreOutcome::from_result(Ok(SubScore::new(0.0, vec![])));
        assert!(!outcome.is_degraded());
        assert!(outcome.reason().is_none());
    }

    #[test]
    fn rounds_to_decimals() {
        assert_eq!(round_to(0.123_456, 3), 0.123);
        assert_eq!(round_to(127.46, 1), 127.5);
        assert_eq!(round_to(-0.049_95, 3), -0.05);
    }
}
