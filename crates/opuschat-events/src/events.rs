use serde::Serialize;
use serde_json::Value;

/// Telemetry event emitted by a provider around a completion call.
///
/// The serialized form tags each payload with its event name so hosts can
/// route on the `event` field alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum LlmEvent {
    #[serde(rename = "llm:request")]
    Request(RequestInfo),
    #[serde(rename = "llm:request:debug")]
    RequestDebug(RequestDebugInfo),
    #[serde(rename = "llm:response")]
    Response(ResponseInfo),
    #[serde(rename = "llm:response:debug")]
    ResponseDebug(ResponseDebugInfo),
}

impl LlmEvent {
    /// Event name as hosts see it (`llm:request`, `llm:response`, ...)
    pub fn name(&self) -> &'static str {
        match self {
            LlmEvent::Request(_) => "llm:request",
            LlmEvent::RequestDebug(_) => "llm:request:debug",
            LlmEvent::Response(_) => "llm:response",
            LlmEvent::ResponseDebug(_) => "llm:response:debug",
        }
    }
}

/// Summary emitted before each vendor call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestInfo {
    pub provider: String,
    pub model: String,
    pub message_count: usize,
    pub has_system: bool,
}

/// Full request payload, emitted only when debug is enabled
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDebugInfo {
    pub payload: Value,
}

/// Outcome summary emitted after each vendor call, success or not
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseInfo {
    pub provider: String,
    pub model: String,
    pub status: String,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseInfo {
    pub fn ok(
        provider: impl Into<String>,
        model: impl Into<String>,
        usage: TokenCounts,
        duration_ms: u64,
    ) -> Self {
        ResponseInfo {
            provider: provider.into(),
            model: model.into(),
            status: "ok".to_string(),
            duration_ms,
            usage: Some(usage),
            error: None,
        }
    }

    pub fn error(
        provider: impl Into<String>,
        model: impl Into<String>,
        duration_ms: u64,
        error: impl Into<String>,
    ) -> Self {
        ResponseInfo {
            provider: provider.into(),
            model: model.into(),
            status: "error".to_string(),
            duration_ms,
            usage: None,
            error: Some(error.into()),
        }
    }
}

/// Input/output token counts as reported by the vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenCounts {
    pub input: u32,
    pub output: u32,
}

/// Response detail, emitted only when debug is enabled. The preview is
/// truncated to 500 characters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseDebugInfo {
    pub content_preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
    pub status: String,
    pub duration_ms: u64,
}
