//! MCP Server connection
//!
//! Wraps an rmcp client service talking to one MCP server over stdio.
//!
//! Connections are deliberately ephemeral: callers connect, perform exactly
//! one request/response exchange, and shut the connection down again. There
//! is no pool and no reconnection logic. The transport kills the child
//! process on drop, so a connection cannot outlive its handle even on a
//! failure path.

use std::process::Stdio;

use anyhow::{anyhow, Context, Result};
use rmcp::model::{CallToolRequestParams, CallToolResult, ListToolsResult, Tool};
use rmcp::service::RunningService;
use rmcp::transport::{ConfigureCommandExt, TokioChildProcess};
use rmcp::{RoleClient, ServiceExt};
use serde_json::{Map, Value};

use super::config::McpServerConfig;

/// A live connection to a single MCP server
pub struct McpServer {
    /// Name of the server, from configuration
    name: String,

    /// The underlying rmcp client service
    service: RunningService<RoleClient, ()>,
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer").field("name", &self.name).finish()
    }
}

impl McpServer {
    /// Launch the configured server process and perform the MCP handshake
    pub async fn connect(config: &McpServerConfig) -> Result<Self> {
        if config.command.is_empty() {
            return Err(anyhow!("No command specified in configuration"));
        }

        tracing::debug!(
            "[McpServer] Launching '{}' ({} {})",
            config.name,
            config.command,
            config.args.join(" ")
        );

        let transport = TokioChildProcess::new(
            tokio::process::Command::new(&config.command).configure(|cmd| {
                cmd.args(&config.args)
                    .envs(config.env.iter())
                    // Server stderr is discarded to keep the chat surface clean
                    .stderr(Stdio::null());
            }),
        )
        .with_context(|| format!("Failed to launch MCP server '{}'", config.name))?;

        let service = ()
            .serve(transport)
            .await
            .with_context(|| format!("Handshake with MCP server '{}' failed", config.name))?;

        tracing::debug!("[McpServer] Connected to '{}'", config.name);

        Ok(Self {
            name: config.name.clone(),
            service,
        })
    }

    /// Get the server name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// List all tools available on this server
    pub async fn list_tools(&self) -> Result<Vec<Tool>> {
        let result: ListToolsResult = self
            .service
            .list_tools(Default::default())
            .await
            .with_context(|| format!("Failed to list tools on MCP server '{}'", self.name))?;

        tracing::debug!(
            "[McpServer] '{}' advertises {} tool(s)",
            self.name,
            result.tools.len()
        );

        Ok(result.tools)
    }

    /// Call a tool on this server
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<CallToolResult> {
        tracing::debug!("[McpServer] Calling '{}' on server '{}'", name, self.name);

        let result = self
            .service
            .call_tool(CallToolRequestParams {
                meta: None,
                name: name.to_string().into(),
                arguments,
                task: None,
            })
            .await
            .with_context(|| {
                format!("Tool call '{}' on MCP server '{}' failed", name, self.name)
            })?;

        Ok(result)
    }

    /// Shut the connection down and reap the child process
    pub async fn shutdown(self) -> Result<()> {
        let name = self.name;
        self.service
            .cancel()
            .await
            .with_context(|| format!("Failed to shut down MCP server '{}'", name))?;

        tracing::debug!("[McpServer] Disconnected from '{}'", name);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_empty_command() {
        let config = McpServerConfig {
            name: "empty".to_string(),
            command: String::new(),
            args: Vec::new(),
            env: Default::default(),
        };

        let err = McpServer::connect(&config).await.unwrap_err();
        assert!(err.to_string().contains("No command specified"));
    }

    #[tokio::test]
    async fn test_connect_fails_for_missing_executable() {
        let config = McpServerConfig {
            name: "ghost".to_string(),
            command: "/nonexistent/mcp-server-binary".to_string(),
            args: Vec::new(),
            env: Default::default(),
        };

        assert!(McpServer::connect(&config).await.is_err());
    }
}
