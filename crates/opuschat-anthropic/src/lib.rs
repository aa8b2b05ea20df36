//! # opuschat-anthropic
//!
//! Anthropic Messages API provider for the opuschat conversation model.
//!
//! The provider translates normalized chat messages into the vendor wire
//! format, repairs and validates tool-call sequences, executes the completion
//! call, and normalizes the vendor response back into the host model.
//!
//! ## Features
//!
//! - **Message Conversion**: role splitting, system preamble assembly, context
//!   relocation, tool-result batching
//! - **Tool-Sequence Repair**: synthesizes placeholder results for interrupted
//!   tool calls so a damaged transcript can still be replayed
//! - **Tool-Sequence Validation**: rejects transcripts the repair engine
//!   cannot fix, before any network I/O
//! - **Telemetry**: emits request/response events through the host's
//!   `EventHooks` seam
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use opuschat_anthropic::{AnthropicConfig, AnthropicProvider};
//! use opuschat_events::NullHooks;
//! use opuschat_models::{ChatRequest, Message};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AnthropicConfig::new("your-api-key");
//!     let provider = AnthropicProvider::new(config, Arc::new(NullHooks));
//!
//!     let request = ChatRequest::new(vec![Message::user("Hello!")]);
//!     let response = provider.complete(&request).await?;
//!     println!("Response: {}", response.first_text().unwrap_or(""));
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod provider;
pub mod repair;
pub mod response;
pub mod validate;
pub mod wire;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use config::AnthropicConfig;
pub use error::ProviderError;
pub use provider::{AnthropicProvider, ChatProvider};
pub use repair::{repair_tool_sequences, RepairKind, RepairRecord};
pub use validate::validate_tool_sequences;
