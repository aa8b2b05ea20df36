//! Anthropic Messages API wire types.
//!
//! These mirror the vendor's JSON shapes exactly. Request types serialize,
//! response types deserialize; both sides use closed tagged variants so an
//! unexpected block shape fails loudly instead of passing through silently.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role of a wire-level conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiRole {
    User,
    Assistant,
}

impl ApiRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiRole::User => "user",
            ApiRole::Assistant => "assistant",
        }
    }
}

/// Turn content: a bare string or an ordered block sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiContent {
    Text(String),
    Blocks(Vec<ApiBlock>),
}

/// Content block inside a request turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ApiBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "thinking")]
    Thinking {
        thinking: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        signature: Option<String>,
    },
    #[serde(rename = "tool_use")]
    ToolUse { id: String, name: String, input: Value },
    #[serde(rename = "tool_result")]
    ToolResult { tool_use_id: String, content: String },
}

/// A single conversation turn on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiTurn {
    pub role: ApiRole,
    pub content: ApiContent,
}

impl ApiTurn {
    pub fn user(content: ApiContent) -> Self {
        ApiTurn {
            role: ApiRole::User,
            content,
        }
    }

    pub fn assistant(content: ApiContent) -> Self {
        ApiTurn {
            role: ApiRole::Assistant,
            content,
        }
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self::user(ApiContent::Text(text.into()))
    }

    /// Ids of every `tool_use` block in this turn, in block order
    pub fn tool_use_ids(&self) -> Vec<&str> {
        match &self.content {
            ApiContent::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    ApiBlock::ToolUse { id, .. } => Some(id.as_str()),
                    _ => None,
                })
                .collect(),
            ApiContent::Text(_) => Vec::new(),
        }
    }

    /// Ids of every `tool_result` block in this turn, in block order
    pub fn tool_result_ids(&self) -> Vec<&str> {
        match &self.content {
            ApiContent::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    ApiBlock::ToolResult { tool_use_id, .. } => Some(tool_use_id.as_str()),
                    _ => None,
                })
                .collect(),
            ApiContent::Text(_) => Vec::new(),
        }
    }
}

/// Request body for `POST /v1/messages`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiRequest {
    pub model: String,
    pub messages: Vec<ApiTurn>,
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ApiTool>>,
}

/// Tool declaration in the vendor schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiTool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Response body for a completed (non-streaming) messages call
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiResponse {
    pub id: String,
    pub content: Vec<ApiResponseBlock>,
    pub model: String,
    #[serde(default)]
    pub stop_reason: Option<String>,
    pub usage: ApiUsage,
}

/// Content block inside a response
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ApiResponseBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "thinking")]
    Thinking {
        thinking: String,
        #[serde(default)]
        signature: Option<String>,
    },
    #[serde(rename = "tool_use")]
    ToolUse { id: String, name: String, input: Value },
}

/// Token counts as reported by the vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ApiUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}
