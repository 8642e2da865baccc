//! Mock provider implementation for testing.

use super::{ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock text provider that answers every prompt with a scripted outcome
/// and remembers the prompts it was given.
pub struct MockTextProvider {
    reply: Result<String, ProviderError>,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            reply: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let text = self.reply.clone()?;
        Ok(ProviderResponse {
            input_tokens: prompt.len() as i32 / 4,
            output_tokens: 1,
            text,
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        !matches!(self.reply, Err(ProviderError::NotConfigured(_)))
    }
}
