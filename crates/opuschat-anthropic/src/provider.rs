//! Completion orchestration.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use opuschat_events::{
    safe_truncate, EventHooks, LlmEvent, RequestDebugInfo, RequestInfo, ResponseDebugInfo,
    ResponseInfo, TokenCounts,
};
use opuschat_models::{ChatRequest, ChatResponse};

use crate::config::AnthropicConfig;
use crate::convert;
use crate::error::ProviderError;
use crate::repair;
use crate::response;
use crate::validate;
use crate::wire::{ApiRequest, ApiResponse};

pub const PROVIDER_NAME: &str = "anthropic";

const ANTHROPIC_VERSION: &str = "2023-06-01";
const PREVIEW_CHARS: usize = 500;

/// A chat completion backend
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError>;

    fn name(&self) -> &str;
}

/// Anthropic Messages API provider.
///
/// Holds one shared `reqwest::Client`; `complete` keeps no state between
/// calls, so a single instance serves concurrent requests.
pub struct AnthropicProvider {
    client: reqwest::Client,
    config: AnthropicConfig,
    hooks: Arc<dyn EventHooks>,
}

impl AnthropicProvider {
    pub fn new(config: AnthropicConfig, hooks: Arc<dyn EventHooks>) -> Self {
        AnthropicProvider {
            client: reqwest::Client::new(),
            config,
            hooks,
        }
    }

    /// Executes one completion call against the vendor.
    ///
    /// Conversion, repair and validation all happen before any network I/O;
    /// a transcript the repair pass cannot fix is rejected without touching
    /// the wire. The vendor call itself is bounded by the configured timeout.
    pub async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let converted = convert::convert_request_messages(&request.messages);
        let (turns, repair_count, _repairs) = repair::repair_tool_sequences(converted.turns);
        if repair_count > 0 {
            log::warn!(
                "repaired {} incomplete tool sequence(s) before sending",
                repair_count
            );
        }
        validate::validate_tool_sequences(&turns)?;

        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.config.default_model.clone());
        let api_request = ApiRequest {
            model: model.clone(),
            messages: turns,
            max_tokens: request.max_output_tokens.unwrap_or(self.config.max_tokens),
            temperature: request.temperature.unwrap_or(self.config.temperature),
            system: converted.system,
            tools: request
                .tools
                .as_deref()
                .map(convert::convert_tools)
                .filter(|tools| !tools.is_empty()),
        };

        self.hooks
            .emit(LlmEvent::Request(RequestInfo {
                provider: PROVIDER_NAME.to_string(),
                model: model.clone(),
                message_count: request.messages.len(),
                has_system: api_request.system.is_some(),
            }))
            .await;
        if self.config.debug {
            match serde_json::to_value(&api_request) {
                Ok(payload) => {
                    self.hooks
                        .emit(LlmEvent::RequestDebug(RequestDebugInfo { payload }))
                        .await;
                }
                Err(e) => log::warn!("request payload not serializable for debug event: {}", e),
            }
        }

        let started = Instant::now();
        match self.send(&api_request).await {
            Ok(api_response) => {
                let duration_ms = started.elapsed().as_millis() as u64;
                self.hooks
                    .emit(LlmEvent::Response(ResponseInfo::ok(
                        PROVIDER_NAME,
                        &model,
                        TokenCounts {
                            input: api_response.usage.input_tokens,
                            output: api_response.usage.output_tokens,
                        },
                        duration_ms,
                    )))
                    .await;

                let mut normalized = response::normalize_response(&api_response);
                if self.config.debug {
                    self.hooks
                        .emit(LlmEvent::ResponseDebug(ResponseDebugInfo {
                            content_preview: safe_truncate(
                                normalized.first_text().unwrap_or(""),
                                PREVIEW_CHARS,
                            ),
                            stop_reason: normalized.finish_reason.clone(),
                            status: "ok".to_string(),
                            duration_ms,
                        }))
                        .await;
                }

                normalized.tool_calls = normalized
                    .tool_calls
                    .take()
                    .map(response::filter_tool_calls)
                    .filter(|calls| !calls.is_empty());
                Ok(normalized)
            }
            Err(err) => {
                let duration_ms = started.elapsed().as_millis() as u64;
                self.hooks
                    .emit(LlmEvent::Response(ResponseInfo::error(
                        PROVIDER_NAME,
                        &model,
                        duration_ms,
                        err.to_string(),
                    )))
                    .await;
                Err(err)
            }
        }
    }

    async fn send(&self, api_request: &ApiRequest) -> Result<ApiResponse, ProviderError> {
        let url = self.config.messages_url();
        log::debug!(
            "POST {} model={} turns={}",
            url,
            api_request.model,
            api_request.messages.len()
        );

        let send_future = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(api_request)
            .send();
        let http_response = tokio::time::timeout(self.config.timeout, send_future)
            .await
            .map_err(|_| ProviderError::Timeout(self.config.timeout))??;

        let status = http_response.status();
        if !status.is_success() {
            let body = http_response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            log::error!("API request failed with status {}: {}", status, body);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let api_response = tokio::time::timeout(self.config.timeout, http_response.json())
            .await
            .map_err(|_| ProviderError::Timeout(self.config.timeout))??;
        Ok(api_response)
    }
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        AnthropicProvider::complete(self, request).await
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}
