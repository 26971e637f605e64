//! Tool Discovery
//!
//! Connects to every configured MCP server, lists its tools, and reports the
//! results grouped by server. Discovery never caches: each call launches
//! fresh connections, and each connection is closed again before the record
//! is returned.
//!
//! A server that fails to launch, handshake, or answer `tools/list` yields a
//! record with `error` set instead of failing discovery as a whole; callers
//! decide what to do with partial results.

use futures::future;
use rmcp::model::Tool;
use serde::Serialize;

use super::config::{McpConfig, McpServerConfig};
use super::server::McpServer;

/// Discovery result for one configured server
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryRecord {
    /// Server name from configuration
    pub server: String,

    /// Tools advertised by the server, in the order the server listed them
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,

    /// Number of tools advertised
    pub tool_count: usize,

    /// Why discovery failed, if it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DiscoveryRecord {
    fn success(server: String, tools: Vec<Tool>) -> Self {
        let tool_count = tools.len();
        Self {
            server,
            tools,
            tool_count,
            error: None,
        }
    }

    fn failure(server: String, error: String) -> Self {
        Self {
            server,
            tools: Vec::new(),
            tool_count: 0,
            error: Some(error),
        }
    }

    /// Whether discovery succeeded for this server
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Discover tools from all configured servers
///
/// Servers are contacted concurrently; the returned records preserve
/// configuration order regardless of which server answered first.
pub async fn discover_tools(config: &McpConfig) -> Vec<DiscoveryRecord> {
    let futures = config
        .servers()
        .iter()
        .map(|server_config| async move {
            let record = discover_server(server_config).await;
            match &record.error {
                None => tracing::info!(
                    "[Discovery] Got {} tool(s) from server '{}'",
                    record.tool_count,
                    record.server
                ),
                Some(err) => tracing::warn!(
                    "[Discovery] Server '{}' failed: {}",
                    record.server,
                    err
                ),
            }
            record
        });

    future::join_all(futures).await
}

/// Connect to one server, list its tools, and disconnect again
async fn discover_server(config: &McpServerConfig) -> DiscoveryRecord {
    let server = match McpServer::connect(config).await {
        Ok(server) => server,
        Err(e) => return DiscoveryRecord::failure(config.name.clone(), format!("{e:#}")),
    };

    // Hold the listing result until the connection is released; `?` here
    // would leak the child on the error path.
    let listed = server.list_tools().await;

    if let Err(e) = server.shutdown().await {
        tracing::debug!("[Discovery] {e:#}");
    }

    match listed {
        Ok(tools) => DiscoveryRecord::success(config.name.clone(), tools),
        Err(e) => DiscoveryRecord::failure(config.name.clone(), format!("{e:#}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unlaunchable_server_yields_error_record() {
        let config = McpConfig::from_json(
            r#"{
                "mcpServers": {
                    "ghost": { "command": "/nonexistent/mcp-server-binary" },
                    "blank": { "command": "" }
                }
            }"#,
        )
        .unwrap();

        let records = discover_tools(&config).await;

        assert_eq!(records.len(), 2);

        // Configuration order preserved even for failures
        assert_eq!(records[0].server, "ghost");
        assert_eq!(records[1].server, "blank");

        for record in &records {
            assert!(!record.is_ok());
            assert_eq!(record.tool_count, 0);
            assert!(record.tools.is_empty());
        }

        assert!(records[1]
            .error
            .as_ref()
            .unwrap()
            .contains("No command specified"));
    }
}
