use std::time::Duration;

use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};
use tracing::{debug, error, instrument};

use super::{LanguageModel, ProviderError};

/// Language model reached through the `genai` multi-provider client.
///
/// Provider credentials come from the environment variables `genai` reads
/// (e.g. `GEMINI_API_KEY` for Gemini models).
#[derive(Clone)]
pub struct GenaiModel {
    client: Client,
    model: String,
    timeout: Duration,
}

impl std::fmt::Debug for GenaiModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiModel")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GenaiModel {
    pub fn new(model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::default(),
            model: model.into(),
            timeout,
        }
    }
}

#[async_trait]
impl LanguageModel for GenaiModel {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);

        let response = tokio::time::timeout(
            self.timeout,
            self.client.exec_chat(&self.model, request, None),
        )
        .await
        .map_err(|_| {
            ProviderError::model(format!(
                "no response within {}s",
                self.timeout.as_secs()
            ))
        })?
        .map_err(|e| {
            error!("Provider error: {}", e);
            ProviderError::model(e.to_string())
        })?;

        let text = response
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::model("completion contained no text"))?;

        debug!(response_len = text.len(), "Completion received");
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
