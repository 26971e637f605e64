//! Weather demo MCP server
//!
//! A minimal stdio MCP server used as the out-of-the-box counterpart for
//! `toolchat`: point an `mcp.json` entry at this binary and the chat client
//! can discover and call its two fixed tools.

use anyhow::Result;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
struct GetWeatherRequest {
    /// Location to report the weather for
    location: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CalculateRequest {
    /// One of "+", "-", "*", "/" or "add", "subtract", "multiply", "divide"
    operator: String,
    /// First numeric argument
    argument1: String,
    /// Second numeric argument
    argument2: String,
}

#[derive(Clone)]
struct WeatherService {
    tool_router: ToolRouter<Self>,
}

impl WeatherService {
    fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl WeatherService {
    #[tool(description = "Get the current weather for a specified location.")]
    fn get_weather(
        &self,
        Parameters(request): Parameters<GetWeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Weather in {}: Sunny, 72°F",
            request.location
        ))]))
    }

    #[tool(
        description = "Provide a basic four function calculator that can add, subtract, multiply or divide two numeric arguments"
    )]
    fn calculate(
        &self,
        Parameters(request): Parameters<CalculateRequest>,
    ) -> Result<CallToolResult, McpError> {
        match evaluate(&request.operator, &request.argument1, &request.argument2) {
            Ok(value) => Ok(CallToolResult::success(vec![Content::text(value)])),
            Err(message) => Ok(CallToolResult::error(vec![Content::text(message)])),
        }
    }
}

#[tool_handler]
impl ServerHandler for WeatherService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "weather-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Weather Service".to_string()),
                website_url: None,
                icons: None,
            },
            instructions: Some(
                "Demo server exposing a fixed weather report and a four-function calculator."
                    .to_string(),
            ),
        }
    }
}

/// Apply one four-function operation to two stringified numbers
///
/// Accepts both symbol and word spellings of the operator, since chat models
/// produce either.
fn evaluate(operator: &str, argument1: &str, argument2: &str) -> Result<String, String> {
    let a: f64 = argument1
        .parse()
        .map_err(|_| format!("Not a number: {argument1}"))?;
    let b: f64 = argument2
        .parse()
        .map_err(|_| format!("Not a number: {argument2}"))?;

    let value = match operator {
        "+" | "add" => a + b,
        "-" | "subtract" => a - b,
        "*" | "multiply" => a * b,
        "/" | "divide" => {
            if b == 0.0 {
                return Err("Division by zero".to_string());
            }
            a / b
        }
        other => return Err(format!("Unknown operator: {other}")),
    };

    Ok(format_number(value))
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP transport; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("weather_server=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Weather server starting on stdio");

    let service = WeatherService::new().serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_symbol_operators() {
        assert_eq!(evaluate("+", "2", "3").unwrap(), "5");
        assert_eq!(evaluate("-", "10", "4").unwrap(), "6");
        assert_eq!(evaluate("*", "5", "6").unwrap(), "30");
        assert_eq!(evaluate("/", "9", "2").unwrap(), "4.5");
    }

    #[test]
    fn test_calculate_word_operators() {
        assert_eq!(evaluate("add", "2", "3").unwrap(), "5");
        assert_eq!(evaluate("subtract", "10", "4").unwrap(), "6");
        assert_eq!(evaluate("multiply", "5", "6").unwrap(), "30");
        assert_eq!(evaluate("divide", "9", "2").unwrap(), "4.5");
    }

    #[test]
    fn test_calculate_errors() {
        assert!(evaluate("^", "2", "3").unwrap_err().contains("Unknown operator"));
        assert!(evaluate("+", "two", "3").unwrap_err().contains("Not a number"));
        assert_eq!(evaluate("/", "1", "0").unwrap_err(), "Division by zero");
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(format_number(30.0), "30");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(0.5), "0.5");
    }
}
