//! OpenAI API client
//!
//! Direct HTTP client for the OpenAI chat-completions API (and any endpoint
//! speaking the same dialect, via `OPENAI_API_BASE`).
//!
//! # Authentication
//!
//! Uses an OpenAI API key (set via `OPENAI_API_KEY` environment variable or
//! passed directly).
//!
//! ```ignore
//! // From environment variables
//! let llm = OpenAiProvider::from_env()?;
//!
//! // With explicit API key
//! let llm = OpenAiProvider::new("sk-...")?.with_model("gpt-4o");
//! ```

use std::env;

use anyhow::{bail, Context, Result};
use reqwest::Client;

use super::provider::ChatProvider;
use super::types::{ChatMessage, ChatRequest, ChatResponse, ToolDefinition};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI chat-completions provider
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider from environment variables
    ///
    /// Reads from:
    /// - `OPENAI_API_KEY` (required)
    /// - `OPENAI_API_BASE` (optional, defaults to the public endpoint)
    pub fn from_env() -> Result<Self> {
        let api_key =
            env::var("OPENAI_API_KEY").context("OPENAI_API_KEY environment variable not set")?;

        let api_base =
            env::var("OPENAI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        tracing::info!("Creating OpenAI provider (base: {})", api_base);

        Ok(Self {
            client: Client::new(),
            api_key,
            api_base,
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Create a new OpenAI provider with an explicit API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[async_trait::async_trait]
impl ChatProvider for OpenAiProvider {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        tools: Option<&[ToolDefinition]>,
    ) -> Result<ChatMessage> {
        let request = ChatRequest {
            model: self.model.clone(),
            tool_choice: tools.map(|_| "auto".to_string()),
            tools: tools.map(|t| t.to_vec()),
            messages,
        };

        tracing::info!(
            "[OpenAiProvider] Requesting completion ({} messages, {} tools)",
            request.messages.len(),
            request.tools.as_ref().map(|t| t.len()).unwrap_or(0)
        );

        let url = format!("{}/chat/completions", self.api_base);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to reach the chat API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Chat API returned {}: {}", status, body);
        }

        let body: ChatResponse = response
            .json()
            .await
            .context("Failed to parse chat API response")?;

        if let Some(usage) = &body.usage {
            tracing::debug!(
                "[OpenAiProvider] Usage: {} prompt + {} completion tokens",
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        let choice = body
            .choices
            .into_iter()
            .next()
            .context("Chat API response contained no choices")?;

        tracing::info!(
            "[OpenAiProvider] Completion finished (reason: {})",
            choice.finish_reason.as_deref().unwrap_or("unknown")
        );

        Ok(choice.message)
    }

    fn model(&self) -> String {
        self.model.clone()
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let provider = OpenAiProvider::new("sk-test")
            .unwrap()
            .with_model("gpt-4o")
            .with_api_base("http://localhost:9999/v1");

        assert_eq!(provider.model(), "gpt-4o");
        assert_eq!(provider.api_base, "http://localhost:9999/v1");
        assert_eq!(provider.provider_name(), "openai");
    }
}
