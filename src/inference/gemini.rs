//! Completion client for the Generative Language `generateContent` API.
//!
//! One non-streaming POST per call. The credential travels as the `key`
//! query parameter; no timeout or retry is configured.

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::inference::types::{GenerateContentRequest, GenerateContentResponse};
use crate::inference::{CompletionClient, CompletionError};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-pro";

pub struct GeminiClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, prompt: &str, credential: &str) -> Result<String, CompletionError> {
        let body = GenerateContentRequest::from_prompt(prompt);

        info!(
            "generateContent request: model={}, prompt_len={}",
            self.model,
            prompt.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", credential)])
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Request(e.without_url().to_string()))?;

        debug!("generateContent response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("generateContent API error: {} - {}", status, body);
            return Err(CompletionError::Status { status, body });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Request(e.without_url().to_string()))?;

        match parsed.first_text() {
            Some(text) => {
                info!("generateContent reply: {} bytes", text.len());
                Ok(text.to_string())
            }
            None => {
                warn!("Unexpected generateContent response shape: {:?}", parsed);
                Err(CompletionError::Empty)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_embeds_model() {
        let client = GeminiClient::new("http://localhost:9000/", "gemini-pro");
        assert_eq!(
            client.endpoint(),
            "http://localhost:9000/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn name_is_gemini() {
        let client = GeminiClient::new(DEFAULT_BASE_URL, DEFAULT_MODEL);
        assert_eq!(client.name(), "gemini");
    }
}
