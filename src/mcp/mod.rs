//! MCP (Model Context Protocol) Support
//!
//! This module owns everything on the tool-server side of the chat loop:
//!
//! - `McpConfig` / `McpServerConfig`: the `mcp.json` document mapping server
//!   names to stdio launch specifications
//! - `McpServer`: one short-lived rmcp connection to a single server
//! - `discover_tools`: lists every configured server's tools, one record per
//!   server in configuration order
//! - `ToolExecutor`: translates discovered tools into the chat API's
//!   function-calling shape, routes invocations by tool name, and turns
//!   every failure into an error string the chat loop can append to history
//!
//! Connections are ephemeral throughout: acquired, used for one
//! request/response exchange, and released — there is no pool.

pub mod config;
pub mod discovery;
pub mod executor;
pub mod server;

pub use config::{McpConfig, McpServerConfig};
pub use discovery::{discover_tools, DiscoveryRecord};
pub use executor::{translate_tool, ToolExecutor};
pub use server::McpServer;
