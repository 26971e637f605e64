//! Conversation orchestration

pub mod session;

pub use session::{is_exit_command, ChatSession};
