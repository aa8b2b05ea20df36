// Models module - normalized chat data structures shared by providers and the host
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use types::{
    ChatRequest, ChatResponse, ContentBlock, Message, MessageContent, ResponseBlock, Role,
    Thinking, ToolCall, ToolSpec, Usage,
};
