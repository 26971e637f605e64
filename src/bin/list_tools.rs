//! Tool discovery CLI
//!
//! Connects to every server in an `mcp.json` document, lists its tools, and
//! prints the discovery records as pretty JSON. Useful for checking a
//! configuration before starting a chat session.

use toolchat::mcp::{discover_tools, McpConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("toolchat=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let Some(config_path) = args.get(1) else {
        eprintln!("Usage: list_tools <path_to_mcp.json>");
        std::process::exit(1);
    };

    let config = match McpConfig::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let records = discover_tools(&config).await;

    println!("{}", serde_json::to_string_pretty(&records)?);

    Ok(())
}
