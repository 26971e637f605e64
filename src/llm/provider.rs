//! Chat provider trait
//!
//! Abstracts the chat-completion boundary so the session loop can run
//! against any OpenAI-compatible backend (or a scripted mock in tests).

use anyhow::Result;

use super::types::{ChatMessage, ToolDefinition};

/// Trait for chat-completion backends used by `ChatSession`.
///
/// One call performs one completion: full history in, one assistant message
/// out. Whether that message carries text or tool invocations is up to the
/// model; passing `Some(tools)` offers the tool list with `tool_choice`
/// left to the model.
#[async_trait::async_trait]
pub trait ChatProvider: Send + Sync {
    /// Request one chat completion over the given history.
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        tools: Option<&[ToolDefinition]>,
    ) -> Result<ChatMessage>;

    /// Get the current model name.
    fn model(&self) -> String;

    /// Get the provider name (e.g., "openai").
    fn provider_name(&self) -> &str;
}
