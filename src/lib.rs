//! toolchat - an interactive chat client wired to MCP tool servers
//!
//! The crate is composed of three layers:
//!
//! - [`mcp`]: configuration, discovery, and execution against stdio-launched
//!   MCP servers, including the translation of tool descriptors into the
//!   chat API's function-calling shape
//! - [`llm`]: the chat-completion boundary (OpenAI wire types, provider
//!   trait, reqwest-backed client)
//! - [`chat`]: the conversation orchestrator owning history and the
//!   per-turn tool round

pub mod chat;
pub mod cli;
pub mod core;
pub mod llm;
pub mod logging;
pub mod mcp;
