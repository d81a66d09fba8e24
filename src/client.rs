//! Gemini API client: one `generateContent` call per request, no retries

use crate::{
    config::{ApiVersion, GeminiConfig},
    error::{Error, Result},
    models::*,
};

use reqwest::{Client as HttpClient, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Main Gemini API client
#[derive(Clone)]
pub struct GeminiClient {
    config: Arc<GeminiConfig>,
    http_client: HttpClient,
}

impl GeminiClient {
    /// Create a new client with the given configuration
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::Config("API key is required".to_string()));
        }

        let http_client = HttpClient::builder().build()?;

        Ok(Self {
            config: Arc::new(config),
            http_client,
        })
    }

    /// Get a builder for creating a customized client
    pub fn builder() -> GeminiClientBuilder {
        GeminiClientBuilder::default()
    }

    /// Generate content with the Gemini API
    #[instrument(skip(self, request))]
    pub async fn generate_content(
        &self,
        model: Option<&str>,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let model_name = self.config.get_model_name(model);
        let endpoint = self.config.endpoint(model_name, "generateContent");

        debug!("Generating content with model: {}", model_name);

        let response = self
            .http_client
            .post(&endpoint)
            .query(&[("key", &self.config.api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;

        if !status.is_success() {
            return Err(handle_api_error(status, body));
        }

        let response: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                prompt_tokens = usage.prompt_token_count,
                candidate_tokens = usage.candidates_token_count,
                total_tokens = usage.total_token_count,
                "Generation finished"
            );
        }

        Ok(response)
    }

    /// Get the configuration
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

/// Map a non-success response onto the error taxonomy
fn handle_api_error(status: StatusCode, body: String) -> Error {
    let details = serde_json::from_str::<serde_json::Value>(&body).ok();

    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = details
                .as_ref()
                .and_then(|d| d.get("retryAfter"))
                .and_then(|v| v.as_u64())
                .map(Duration::from_secs);

            Error::RateLimit { retry_after }
        }
        _ => Error::Api {
            status: status.as_u16(),
            message: details
                .as_ref()
                .and_then(|d| d.get("error"))
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .unwrap_or(&body)
                .to_string(),
            details,
        },
    }
}

/// Builder for creating a customized GeminiClient
#[derive(Default)]
pub struct GeminiClientBuilder {
    config: GeminiConfig,
}

impl GeminiClientBuilder {
    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the API version
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.config.api_version = version;
        self
    }

    /// Set the default model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model_config.model = model.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<GeminiClient> {
        GeminiClient::new(self.config)
    }
}
