use async_trait::async_trait;
use color_eyre::eyre::{Context, Result, bail};
use common_types::{Classification, Prediction};
use language_model::LlamaClient;
use serde::Deserialize;
use tracing::warn;

/// Names the main subject of an image.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, jpeg: &[u8]) -> Result<Classification>;

    /// Whether the backing model can currently be reached.
    async fn is_ready(&self) -> bool;
}

#[derive(Deserialize)]
struct LlmPredictions {
    predictions: Vec<LlmPrediction>,
}

#[derive(Deserialize)]
struct LlmPrediction {
    label: String,
    confidence: f64,
}

/// Classifier backed by a vision language model answering with a JSON schema.
pub struct LlmClassifier {
    llm: LlamaClient,
    top_predictions: usize,
}

impl LlmClassifier {
    #[must_use]
    pub const fn new(llm: LlamaClient, top_predictions: usize) -> Self {
        Self {
            llm,
            top_predictions,
        }
    }
}

#[async_trait]
impl Classifier for LlmClassifier {
    async fn classify(&self, jpeg: &[u8]) -> Result<Classification> {
        let prompt = prompts::classification(self.top_predictions);
        let response = self
            .llm
            .chat(&prompt)
            .images(&[jpeg])
            .schema(schemas::predictions())
            .call()
            .await
            .wrap_err("LLM classification request failed")?;

        let parsed = serde_json::from_str::<LlmPredictions>(&response).inspect_err(|e| {
            warn!("Failed to parse classification: {e}. Raw LLM output: {response}");
        })?;
        to_classification(parsed.predictions, self.top_predictions)
    }

    async fn is_ready(&self) -> bool {
        self.llm.is_healthy().await
    }
}

fn to_classification(predictions: Vec<LlmPrediction>, top_n: usize) -> Result<Classification> {
    let mut predictions: Vec<Prediction> = predictions
        .into_iter()
        .map(|p| Prediction {
            label: p.label.trim().to_string(),
            confidence: p.confidence.clamp(0.0, 1.0),
        })
        .filter(|p| !p.label.is_empty())
        .collect();
    predictions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    predictions.truncate(top_n.max(1));

    let Some(best) = predictions.first() else {
        bail!("Classifier returned no predictions");
    };
    Ok(Classification {
        label: best.label.clone(),
        confidence: best.confidence,
        top_predictions: predictions.clone(),
    })
}

mod prompts {
    pub fn classification(top_n: usize) -> String {
        format!(
            "Classify the main subject of this photo. Give up to {top_n} candidate labels, \
            most likely first. Each label is a short lowercase object or scene name, like an \
            ImageNet class (e.g. golden retriever, sweatshirt, seashore, pizza, jersey). \
            Confidence is a probability between 0 and 1."
        )
    }
}

mod schemas {
    use serde_json::{Value, json};

    pub fn predictions() -> Value {
        json!({
            "type": "object",
            "properties": {
                "predictions": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "label": { "type": "string" },
                            "confidence": { "type": "number" }
                        },
                        "required": ["label", "confidence"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["predictions"],
            "additionalProperties": false
        })
    }
}
