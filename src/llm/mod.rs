pub mod openai;
pub mod provider;
pub mod types;

pub use openai::OpenAiProvider;
pub use provider::ChatProvider;
pub use types::{
    ChatChoice, ChatMessage, ChatRequest, ChatResponse, FunctionCall, FunctionSpec, ToolCall,
    ToolDefinition, Usage,
};
