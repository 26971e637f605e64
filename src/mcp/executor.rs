//! Tool Executor
//!
//! The translation layer between the MCP tool protocol and the chat API's
//! function-calling surface.
//!
//! At startup, `initialize_tools` runs discovery once, reformats every
//! advertised tool into the chat API's definition shape, and records which
//! server owns which tool name. At call time, `execute_tool` re-resolves the
//! owning server, opens a fresh connection for exactly one invocation, and
//! reduces the result payload to display text.
//!
//! Everything below the chat loop is converted to text here: routing misses,
//! launch failures, and tool-side faults all come back as `{"error": ...}`
//! strings suitable for insertion into conversation history. `execute_tool`
//! never returns `Err`.

use std::collections::HashMap;

use anyhow::{Context, Result};
use rmcp::model::{CallToolResult, RawContent, Tool};
use serde_json::{json, Value};

use crate::llm::types::{FunctionSpec, ToolDefinition};

use super::config::McpConfig;
use super::discovery::{discover_tools, DiscoveryRecord};
use super::server::McpServer;

/// Routes tool invocations to their owning MCP servers
pub struct ToolExecutor {
    /// The configuration document, immutable after construction
    config: McpConfig,

    /// Maps tool names to server names
    tool_to_server: HashMap<String, String>,
}

impl ToolExecutor {
    /// Create an executor for the given configuration
    ///
    /// The routing table starts empty; call `initialize_tools` to fill it.
    pub fn new(config: McpConfig) -> Self {
        Self {
            config,
            tool_to_server: HashMap::new(),
        }
    }

    /// Discover all tools and translate them for the chat API
    ///
    /// Servers whose discovery failed are excluded from the translated list
    /// (logged at `warn`, not swallowed); the session continues with the
    /// remaining servers. A server with zero tools contributes nothing and
    /// is also logged. Returns the flattened translated list.
    pub async fn initialize_tools(&mut self) -> Result<Vec<ToolDefinition>> {
        let records = discover_tools(&self.config).await;
        let definitions = self.register_records(records)?;

        if definitions.is_empty() {
            tracing::warn!("[ToolExecutor] No tools available from any configured server");
        }

        Ok(definitions)
    }

    /// Build the routing table and translated list from discovery records
    fn register_records(&mut self, records: Vec<DiscoveryRecord>) -> Result<Vec<ToolDefinition>> {
        let mut definitions = Vec::new();

        for record in records {
            if let Some(error) = &record.error {
                tracing::warn!(
                    "[ToolExecutor] Excluding server '{}' from the tool list: {}",
                    record.server,
                    error
                );
                continue;
            }

            if record.tool_count == 0 {
                tracing::warn!(
                    "[ToolExecutor] Server '{}' advertises no tools",
                    record.server
                );
                continue;
            }

            for tool in &record.tools {
                // Name collisions across servers: last discovered wins.
                if let Some(previous) = self
                    .tool_to_server
                    .insert(tool.name.to_string(), record.server.clone())
                {
                    if previous != record.server {
                        tracing::warn!(
                            "[ToolExecutor] Tool '{}' on '{}' shadows the one on '{}'",
                            tool.name,
                            record.server,
                            previous
                        );
                    }
                }

                definitions.push(translate_tool(tool)?);
            }
        }

        Ok(definitions)
    }

    /// Number of routed tool names
    pub fn routed_tool_count(&self) -> usize {
        self.tool_to_server.len()
    }

    /// Server owning the given tool name, if routed
    pub fn server_for(&self, tool_name: &str) -> Option<&str> {
        self.tool_to_server.get(tool_name).map(String::as_str)
    }

    /// Execute a tool on the server that owns it
    ///
    /// Opens a new connection for this one invocation and releases it before
    /// returning. Every failure mode becomes an `{"error": ...}` string; the
    /// caller can always append the return value to conversation history.
    pub async fn execute_tool(&self, name: &str, arguments: Value) -> String {
        let Some(server_name) = self.tool_to_server.get(name) else {
            return error_text(format!("Tool {name} not found"));
        };

        let Some(server_config) = self.config.server(server_name) else {
            return error_text(format!("Server {server_name} not configured"));
        };

        tracing::info!(
            "[ToolExecutor] Executing '{}' on server '{}'",
            name,
            server_name
        );

        let server = match McpServer::connect(server_config).await {
            Ok(server) => server,
            Err(e) => return error_text(format!("{e:#}")),
        };

        // One invocation per connection; release before inspecting the result
        // so the child is reaped on the failure path too.
        let call = server.call_tool(name, arguments.as_object().cloned()).await;

        if let Err(e) = server.shutdown().await {
            tracing::debug!("[ToolExecutor] {e:#}");
        }

        match call {
            Ok(result) => {
                let text = extract_text(&result);
                if result.is_error.unwrap_or(false) {
                    error_text(text)
                } else {
                    text
                }
            }
            Err(e) => error_text(format!("{e:#}")),
        }
    }
}

/// Reformat a native tool descriptor into the chat API's function shape
///
/// The input schema is carried over verbatim: parameter names, types, and
/// required lists all pass through untouched. A schema that cannot be
/// serialized is reported as an error rather than dropped.
pub fn translate_tool(tool: &Tool) -> Result<ToolDefinition> {
    let parameters = serde_json::to_value(tool.input_schema.as_ref())
        .with_context(|| format!("Schema of tool '{}' cannot be translated", tool.name))?;

    Ok(ToolDefinition::function(FunctionSpec {
        name: tool.name.to_string(),
        description: tool
            .description
            .as_deref()
            .unwrap_or_default()
            .to_string(),
        parameters: Some(parameters),
    }))
}

/// Reduce a tool result payload to display text
///
/// Text parts are concatenated with newlines in payload order; every
/// non-text part (image, audio, resource, link) is included as its JSON
/// representation rather than dropped.
fn extract_text(result: &CallToolResult) -> String {
    let mut parts = Vec::new();

    for content in &result.content {
        if let RawContent::Text(text) = &content.raw {
            parts.push(text.text.clone());
        } else {
            match serde_json::to_string(content) {
                Ok(serialized) => parts.push(serialized),
                Err(e) => {
                    tracing::debug!("[ToolExecutor] Skipping unserializable part: {e}");
                }
            }
        }
    }

    parts.join("\n")
}

/// Shape an error message for insertion into conversation history
fn error_text(message: impl Into<String>) -> String {
    json!({ "error": message.into() }).to_string()
}
