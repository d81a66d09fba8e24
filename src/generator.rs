//! The text-generation seam between the smoke-test flow and the transport

use crate::{client::GeminiClient, error::Result, models::GenerateContentRequest};
use async_trait::async_trait;

/// Something that turns a prompt into generated text with a named model
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Submit `prompt` to `model` once and return the generated text
    async fn generate_text(&self, model: &str, prompt: &str) -> Result<String>;
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, model: &str, prompt: &str) -> Result<String> {
        let response = self
            .generate_content(Some(model), GenerateContentRequest::prompt(prompt))
            .await?;
        response.text()
    }
}
