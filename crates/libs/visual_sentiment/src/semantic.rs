//! Keyword scoring over the classification label and the generated caption.
//!
//! Classification tiers are evaluated in order and the first tier containing a
//! keyword that is a substring of the label wins. Caption indicators are scanned
//! per polarity, stopping at the first hit, and both polarities may contribute.

use crate::{ScoreOutcome, SentimentError, SubScore};
use tracing::{debug, warn};

const JOY_BOOST: f64 = 0.8;
const SADNESS_BOOST: f64 = -0.6;

const JOY_INDICATORS: &[&str] = &[
    "arms up",
    "fists raised",
    "celebrating",
    "cheering",
    "jumping",
    "dancing",
    "smiling",
    "laughing",
    "victory",
    "success",
    "happy",
    "excited",
    "thumbs up",
    "waving",
    "pointing up",
    "hands up",
];

const SAD_INDICATORS: &[&str] = &[
    "crying",
    "sad",
    "depressed",
    "down",
    "head down",
    "covering face",
    "tears",
    "grief",
    "mourning",
];

/// What a matched tier contributes.
#[derive(Debug, Clone, Copy)]
enum TierEffect {
    Fixed { boost: f64, note: &'static str },
    /// Boost depends on whether the caption already showed joy.
    CaptionDependent {
        with_joy: (f64, &'static str),
        without_joy: (f64, &'static str),
    },
}

#[derive(Debug)]
struct KeywordTier {
    keywords: &'static [&'static str],
    effect: TierEffect,
}

const CLASSIFICATION_TIERS: &[KeywordTier] = &[
    KeywordTier {
        keywords: &[
            "golden retriever",
            "labrador",
            "dog",
            "puppy",
            "flower",
            "garden",
            "beach",
            "sunset",
            "sunrise",
            "baby",
            "child",
            "wedding",
            "celebration",
            "party",
            "cake",
            "ice cream",
            "birthday",
            "butterfly",
            "bird",
            "rainbow",
        ],
        effect: TierEffect::Fixed {
            boost: 0.7,
            note: "Very positive object",
        },
    },
    KeywordTier {
        keywords: &[
            "food",
            "fruit",
            "nature",
            "tree",
            "park",
            "sport",
            "football",
            "basketball",
            "tennis",
            "music",
            "guitar",
            "piano",
            "vacation",
            "travel",
            "adventure",
        ],
        effect: TierEffect::Fixed {
            boost: 0.4,
            note: "Positive object",
        },
    },
    KeywordTier {
        keywords: &[
            "sweatshirt",
            "hoodie",
            "jersey",
            "sportswear",
            "running",
            "exercise",
            "fitness",
            "yoga",
            "dance",
            "celebration",
            "victory",
            "polo shirt",
        ],
        effect: TierEffect::CaptionDependent {
            with_joy: (0.5, "Positive activity"),
            without_joy: (0.1, "Casual/athletic wear"),
        },
    },
    KeywordTier {
        keywords: &[
            "storm",
            "rain",
            "dark",
            "shadow",
            "weapon",
            "fire",
            "smoke",
            "accident",
            "hospital",
            "medicine",
            "bandage",
            "funeral",
            "cemetery",
            "prison",
        ],
        effect: TierEffect::Fixed {
            boost: -0.4,
            note: "Negative object",
        },
    },
    KeywordTier {
        keywords: &[
            "building",
            "street",
            "car",
            "computer",
            "document",
            "book",
            "tool",
            "furniture",
            "desk",
            "chair",
            "table",
        ],
        effect: TierEffect::Fixed {
            boost: 0.1,
            note: "Neutral object",
        },
    },
];

#[derive(Debug, Default, PartialEq)]
struct Boost {
    value: f64,
    notes: Vec<String>,
}

/// Sentiment contribution from the top classification label and the caption.
///
/// `None` for either input means the collaborator failed to produce it.
#[must_use]
pub fn score_semantics(label: Option<&str>, caption: Option<&str>) -> ScoreOutcome {
    let outcome = ScoreOutcome::from_result(try_score_semantics(label, caption));
    match outcome.reason() {
        Some(reason) => warn!("Semantic analysis degraded: {reason}"),
        None => debug!("Semantic score: {}", outcome.score()),
    }
    outcome
}

fn try_score_semantics(
    label: Option<&str>,
    caption: Option<&str>,
) -> Result<SubScore, SentimentError> {
    let label = label
        .ok_or(SentimentError::InputUnavailable("classification"))?
        .to_lowercase();
    let caption = caption
        .ok_or(SentimentError::InputUnavailable("caption"))?
        .to_lowercase();

    let caption_boost = caption_boost(&caption);
    let classification_boost = classification_boost(&label, caption_boost.value);
    debug!(
        "Classification boost: {}, caption boost: {}",
        classification_boost.value, caption_boost.value
    );

    let mut notes = classification_boost.notes;
    notes.extend(caption_boost.notes);
    if notes.is_empty() {
        notes.push(format!("Classification: {label}"));
    }

    Ok(
        SubScore::new(classification_boost.value + caption_boost.value, notes)
            .with_metric("classification_boost", classification_boost.value)
            .with_metric("description_boost", caption_boost.value)
            .with_input("classification", &label)
            .with_input("description_analyzed", &caption),
    )
}

fn first_match<'a>(text: &str, phrases: &[&'a str]) -> Option<&'a str> {
    phrases.iter().copied().find(|phrase| text.contains(phrase))
}

fn caption_boost(caption: &str) -> Boost {
    let mut boost = Boost::default();
    if let Some(indicator) = first_match(caption, JOY_INDICATORS) {
        boost.value += JOY_BOOST;
        boost
            .notes
            .push(format!("Positive posture detected: {indicator}"));
    }
    if let Some(indicator) = first_match(caption, SAD_INDICATORS) {
        boost.value += SADNESS_BOOST;
        boost
            .notes
            .push(format!("Negative posture detected: {indicator}"));
    }
    boost
}

fn classification_boost(label: &str, caption_boost: f64) -> Boost {
    CLASSIFICATION_TIERS
        .iter()
        .find_map(|tier| {
            let keyword = first_match(label, tier.keywords)?;
            let (value, note) = match tier.effect {
                TierEffect::Fixed { boost, note } => (boost, note),
                TierEffect::CaptionDependent {
                    with_joy,
                    without_joy,
                } => {
                    if caption_boost > 0.0 {
                        with_joy
                    } else {
                        without_joy
                    }
                }
            };
            Some(Boost {
                value,
                notes: vec![format!("{note}: {keyword}")],
            })
        })
        .unwrap_or_default()
}
