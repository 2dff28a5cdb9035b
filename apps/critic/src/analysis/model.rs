//! Critique model seam: anything that turns resume text into a free-text critique.

use async_trait::async_trait;
use tracing::debug;

use crate::errors::AppError;
use crate::llm_client::prompts::{critique_prompt, CRITIQUE_SYSTEM};
use crate::llm_client::{LlmClient, LlmError, LlmSettings};

/// Implement this to swap the critique backend without touching the pipeline.
#[async_trait]
pub trait CritiqueModel: Send + Sync {
    async fn critique(&self, resume_text: &str) -> Result<String, LlmError>;
}

/// Critique backed by the chat-completions API.
pub struct LlmCritiqueModel {
    llm: LlmClient,
}

impl LlmCritiqueModel {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    /// Builds the underlying HTTP client from endpoint settings.
    pub fn from_settings(settings: LlmSettings) -> Result<Self, AppError> {
        Ok(Self::new(LlmClient::new(settings)?))
    }

    pub fn model(&self) -> &str {
        self.llm.model()
    }
}

#[async_trait]
impl CritiqueModel for LlmCritiqueModel {
    async fn critique(&self, resume_text: &str) -> Result<String, LlmError> {
        debug!(
            model = self.llm.model(),
            chars = resume_text.len(),
            "Requesting resume critique"
        );
        let prompt = critique_prompt(resume_text);
        self.llm.complete(&prompt, CRITIQUE_SYSTEM).await
    }
}
