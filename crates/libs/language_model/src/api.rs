use base64::{Engine as _, engine::general_purpose};
use bon::bon;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LlamaError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("API error (status {status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("model returned an empty response")]
    EmptyResponse,
}

pub type LlamaResult<T> = Result<T, LlamaError>;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Message {
    pub role: String,
    pub content: MessageContent,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<MessagePart>),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum MessagePart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    stream: bool,
    temperature: f32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<Value>,
}

#[derive(Deserialize)]
pub struct ChatFullResponse {
    pub choices: Vec<FullChoice>,
}

#[derive(Deserialize)]
pub struct FullChoice {
    pub message: FullMessage,
}

#[derive(Deserialize)]
pub struct FullMessage {
    pub content: Option<String>,
}

#[derive(Clone, Debug)]
pub struct LlamaConfig {
    pub temperature: f32,
    pub top_p: f32,
}

/// Client for an OpenAI-compatible `/v1/chat/completions` endpoint with image input.
#[derive(Clone, Debug)]
pub struct LlamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    config: LlamaConfig,
}

#[bon]
impl LlamaClient {
    #[builder(start_fn = with_base_url)]
    #[must_use]
    pub fn new(
        #[builder(start_fn)] base_url: &str,
        model: Option<String>,
        temperature: Option<f32>,
        top_p: Option<f32>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.unwrap_or_default(),
            config: LlamaConfig {
                temperature: temperature.unwrap_or(0.2),
                top_p: top_p.unwrap_or(0.8),
            },
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Builds a user message with the prompt followed by each image as a base64 data url.
    #[must_use]
    pub fn prepare_message(prompt: &str, images: &[&[u8]]) -> Message {
        let mut parts = vec![MessagePart::Text {
            text: prompt.to_string(),
        }];
        for bytes in images {
            let mime_type = infer::get(bytes).map_or("image/jpeg", |kind| kind.mime_type());
            let b64 = general_purpose::STANDARD.encode(bytes);
            parts.push(MessagePart::ImageUrl {
                image_url: ImageUrl {
                    url: format!("data:{mime_type};base64,{b64}"),
                },
            });
        }
        Message {
            role: "user".to_string(),
            content: MessageContent::Parts(parts),
        }
    }

    /// Single prompt, optional images, optional JSON schema the reply must follow.
    #[builder]
    pub async fn chat(
        &self,
        #[builder(start_fn)] prompt: &str,
        images: Option<&[&[u8]]>,
        schema: Option<Value>,
    ) -> LlamaResult<String> {
        let msg = Self::prepare_message(prompt, images.unwrap_or_default());
        self.call(vec![msg], schema).await
    }

    pub async fn call(&self, messages: Vec<Message>, schema: Option<Value>) -> LlamaResult<String> {
        let req_body = self.build_request(messages, schema);
        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!("Calling {url} with model '{}'", self.model);
        let response = self.http.post(url).json(&req_body).send().await?;
        if !response.status().is_success() {
            return Err(LlamaError::Api {
                status: response.status(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        let full: ChatFullResponse = response.json().await?;
        full.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(LlamaError::EmptyResponse)
    }

    /// True when the server answers its health route with a success status.
    pub async fn is_healthy(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.http.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("LLM health check failed: {e}");
                false
            }
        }
    }

    fn build_request(&self, messages: Vec<Message>, schema: Option<Value>) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages,
            stream: false,
            top_p: self.config.top_p,
            temperature: self.config.temperature,
            response_format: schema.map(|schema| {
                json!({
                    "type": "json_schema",
                    "json_schema": { "name": "response", "strict": true, "schema": schema }
                })
            }),
        }
    }
}
