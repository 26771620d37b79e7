use async_trait::async_trait;
use color_eyre::eyre::{Context, Result, bail};
use language_model::LlamaClient;

const CAPTION_PROMPT: &str = "You are an image captioning assistant. Describe this image in \
one short, factual sentence. Mention the main subject, what it is doing, and how it looks. \
Do not add opinions or creative interpretations.";

/// Produces a one-sentence natural-language description of an image.
#[async_trait]
pub trait Captioner: Send + Sync {
    async fn caption(&self, jpeg: &[u8]) -> Result<String>;

    async fn is_ready(&self) -> bool;
}

pub struct LlmCaptioner {
    llm: LlamaClient,
}

impl LlmCaptioner {
    #[must_use]
    pub const fn new(llm: LlamaClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Captioner for LlmCaptioner {
    async fn caption(&self, jpeg: &[u8]) -> Result<String> {
        let response = self
            .llm
            .chat(CAPTION_PROMPT)
            .images(&[jpeg])
            .call()
            .await
            .wrap_err("LLM caption request failed")?;
        clean_caption(&response)
    }

    async fn is_ready(&self) -> bool {
        self.llm.is_healthy().await
    }
}

fn clean_caption(raw: &str) -> Result<String> {
    let caption = raw.trim().trim_matches('"').trim();
    if caption.is_empty() {
        bail!("Captioner returned an empty description");
    }
    Ok(caption.to_string())
}
