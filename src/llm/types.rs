//! OpenAI chat-completions API types
//!
//! These types serialize/deserialize against the OpenAI `/chat/completions`
//! endpoint, including the function-calling surface (`tools`, `tool_calls`,
//! `tool_choice`). Conversation history is kept directly in this wire shape,
//! so the assistant's tool-call intent is preserved verbatim in context.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Messages
// ============================================================================

/// A message in the conversation
///
/// Role is one of "user", "assistant", or "tool". Tool-result messages carry
/// `tool_call_id`; assistant messages that request invocations carry
/// `tool_calls`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: String,

    /// Text content; may be absent on assistant messages that only call tools
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Tool invocations requested by the assistant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,

    /// Identifier of the invocation this message answers (role "tool" only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(text.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// Create a plain assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: Some(text.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// Create a tool-result message answering one invocation
    pub fn tool_result(tool_call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            role: "tool".to_string(),
            content: Some(output.into()),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
        }
    }

    /// Tool calls requested by this message, if any
    pub fn tool_calls(&self) -> &[ToolCall] {
        self.tool_calls.as_deref().unwrap_or_default()
    }

    /// Text content, empty string when absent
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// One tool invocation requested by the assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Invocation identifier, echoed back on the tool-result message
    pub id: String,

    /// Invocation type (always "function")
    #[serde(rename = "type")]
    pub call_type: String,

    /// The function to invoke
    pub function: FunctionCall,
}

/// Name and serialized arguments of a requested invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Tool name
    pub name: String,

    /// JSON-encoded argument payload
    pub arguments: String,
}

// ============================================================================
// Tool definitions
// ============================================================================

/// A tool advertised to the chat API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Definition type (always "function")
    #[serde(rename = "type")]
    pub definition_type: String,

    /// The function being described
    pub function: FunctionSpec,
}

impl ToolDefinition {
    /// Create a function tool definition
    pub fn function(spec: FunctionSpec) -> Self {
        Self {
            definition_type: "function".to_string(),
            function: spec,
        }
    }

    /// Tool name
    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// Name, description, and parameter schema of one function tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// Tool name
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema of the accepted parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

// ============================================================================
// Request / response
// ============================================================================

/// Request body for `/chat/completions`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// The model to use
    pub model: String,

    /// Full ordered conversation history
    pub messages: Vec<ChatMessage>,

    /// Tools available to the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,

    /// Tool-choice policy ("auto" when tools are offered)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
}

/// Response body from `/chat/completions`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Completion choices; the first one is used
    pub choices: Vec<ChatChoice>,

    /// Token usage, when reported
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// One completion choice
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The assistant's message
    pub message: ChatMessage,

    /// Why generation stopped ("stop", "tool_calls", ...)
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message_serialization() {
        let msg = ChatMessage::user("hello");
        let value = serde_json::to_value(&msg).unwrap();

        // Absent optional fields must not appear on the wire
        assert_eq!(value, json!({ "role": "user", "content": "hello" }));
    }

    #[test]
    fn test_tool_result_serialization() {
        let msg = ChatMessage::tool_result("call_1", "42");
        let value = serde_json::to_value(&msg).unwrap();

        assert_eq!(
            value,
            json!({ "role": "tool", "content": "42", "tool_call_id": "call_1" })
        );
    }

    #[test]
    fn test_response_with_tool_calls_deserialization() {
        let body = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {
                            "name": "calculate",
                            "arguments": "{\"operator\":\"multiply\",\"argument1\":\"5\",\"argument2\":\"6\"}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
        });

        let response: ChatResponse = serde_json::from_value(body).unwrap();
        let message = &response.choices[0].message;

        assert_eq!(message.role, "assistant");
        assert!(message.content.is_none());

        let calls = message.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "call_abc");
        assert_eq!(calls[0].function.name, "calculate");

        let args: Value = serde_json::from_str(&calls[0].function.arguments).unwrap();
        assert_eq!(args["operator"], "multiply");
    }

    #[test]
    fn test_request_without_tools_omits_fields() {
        let request = ChatRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage::user("hi")],
            tools: None,
            tool_choice: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("tools").is_none());
        assert!(value.get("tool_choice").is_none());
    }

    #[test]
    fn test_tool_definition_shape() {
        let def = ToolDefinition::function(FunctionSpec {
            name: "get_weather".to_string(),
            description: "Get the current weather".to_string(),
            parameters: Some(json!({
                "type": "object",
                "properties": { "location": { "type": "string" } },
                "required": ["location"]
            })),
        });

        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(value["type"], "function");
        assert_eq!(value["function"]["name"], "get_weather");
        assert_eq!(value["function"]["parameters"]["required"][0], "location");
    }
}
