//! Chat Session
//!
//! Owns the conversation history and drives the per-turn control loop:
//! one completion with the tool list offered, an optional single round of
//! sequential tool execution, and a follow-up completion to synthesize the
//! final answer. Exactly one tool round per user turn; the loop never
//! recurses into nested tool rounds.

use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use crate::cli::Console;
use crate::llm::{ChatMessage, ChatProvider, ToolDefinition};
use crate::mcp::ToolExecutor;

/// An interactive chat session wired to MCP tools
///
/// History is append-only and lives for exactly one session; nothing is
/// persisted.
pub struct ChatSession {
    provider: Arc<dyn ChatProvider>,
    executor: ToolExecutor,
    history: Vec<ChatMessage>,
    tools: Vec<ToolDefinition>,
}

impl ChatSession {
    /// Create a session over the given chat backend and tool executor
    pub fn new(provider: Arc<dyn ChatProvider>, executor: ToolExecutor) -> Self {
        Self {
            provider,
            executor,
            history: Vec::new(),
            tools: Vec::new(),
        }
    }

    /// Discover and translate tools for the session
    ///
    /// Runs once at startup; the translated list is offered on the first
    /// completion of every subsequent turn. Returns the tool count.
    pub async fn initialize(&mut self) -> Result<usize> {
        self.tools = self.executor.initialize_tools().await?;
        Ok(self.tools.len())
    }

    /// Send one user message and resolve the full turn
    ///
    /// Appends the user entry, requests a completion with the tool list, and
    /// either returns the assistant's text directly or executes the
    /// requested invocations in order and asks for a follow-up completion
    /// over the extended history. History grows by 2 entries for a plain
    /// turn and K+3 for a turn with K invocations.
    pub async fn send_message(&mut self, user_text: &str) -> Result<String> {
        self.history.push(ChatMessage::user(user_text));

        let tools = if self.tools.is_empty() {
            None
        } else {
            Some(self.tools.as_slice())
        };

        let reply = self.provider.complete(self.history.clone(), tools).await?;

        let calls = reply.tool_calls().to_vec();

        if calls.is_empty() {
            let text = reply.text().to_string();
            self.history.push(ChatMessage::assistant(text.clone()));
            return Ok(text);
        }

        // Keep the model's invocation requests verbatim in context
        self.history.push(reply);

        // Sequential on purpose: each result entry must line up with its
        // request in the order the model asked for them.
        for call in &calls {
            let output = match serde_json::from_str::<Value>(&call.function.arguments) {
                Ok(arguments) => {
                    self.executor
                        .execute_tool(&call.function.name, arguments)
                        .await
                }
                Err(e) => serde_json::json!({
                    "error": format!("Malformed arguments for {}: {}", call.function.name, e)
                })
                .to_string(),
            };

            tracing::info!(
                "[ChatSession] Tool '{}' ({}) resolved",
                call.function.name,
                call.id
            );

            self.history.push(ChatMessage::tool_result(&call.id, output));
        }

        // Second pass synthesizes from the tool results; no tool list needed
        let final_reply = self.provider.complete(self.history.clone(), None).await?;

        let text = final_reply.text().to_string();
        self.history.push(ChatMessage::assistant(text.clone()));

        Ok(text)
    }

    /// The conversation history accumulated so far
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Run the interactive read-eval loop
    ///
    /// Terminates on the exit keyword without issuing a further completion.
    /// A failed turn is printed and the loop keeps accepting input.
    pub async fn run(&mut self, console: &Console) -> Result<()> {
        loop {
            let Some(input) = console.read_input()? else {
                // stdin closed
                console.print_goodbye();
                break;
            };

            if input.is_empty() {
                continue;
            }

            if is_exit_command(&input) {
                console.print_goodbye();
                break;
            }

            let turn_start = self.history.len();

            match self.send_message(&input).await {
                Ok(reply) => {
                    for entry in &self.history[turn_start..] {
                        for call in entry.tool_calls() {
                            console.print_tool_action(
                                &call.function.name,
                                &format!("called with {}", call.function.arguments),
                            );
                        }
                    }
                    console.print_assistant(&reply);
                    console.println();
                }
                Err(e) => {
                    tracing::error!("[ChatSession] Turn failed: {e:#}");
                    console.print_error(&format!("{e:#}"));
                }
            }
        }

        Ok(())
    }
}

/// Whether the input ends the interactive loop ("exit"/"quit", any case)
pub fn is_exit_command(input: &str) -> bool {
    matches!(
        input.trim().to_lowercase().as_str(),
        "exit" | "quit"
    )
}
