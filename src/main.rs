use std::env;
use std::sync::Arc;

use toolchat::chat::ChatSession;
use toolchat::cli::Console;
use toolchat::llm::{ChatProvider, OpenAiProvider};
use toolchat::logging;
use toolchat::mcp::{McpConfig, ToolExecutor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log_guard = logging::init_logging()?;

    tracing::info!("=== toolchat starting ===");

    let args: Vec<String> = env::args().collect();

    let Some(config_path) = args.get(1) else {
        eprintln!("Usage: toolchat <path_to_mcp.json> [model]");
        eprintln!("  model: Optional chat model (default: gpt-4o-mini)");
        std::process::exit(1);
    };

    // Configuration and credential problems are fatal before any chat begins
    let config = McpConfig::load(config_path)?;

    let mut provider = OpenAiProvider::from_env()?;
    if let Some(model) = args.get(2) {
        provider = provider.with_model(model.as_str());
    }

    let console = Console::new();
    console.print_banner(&provider.model());

    let mut session = ChatSession::new(Arc::new(provider), ToolExecutor::new(config));

    console.print_system("Initializing MCP tools...");
    let tool_count = session.initialize().await?;
    console.print_system(&format!("Loaded {} tools from MCP servers", tool_count));
    console.println();

    session.run(&console).await?;

    tracing::info!("=== toolchat shutting down ===");

    Ok(())
}
