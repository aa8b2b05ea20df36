//! Vendor response normalization.

use opuschat_models::{ChatResponse, ResponseBlock, ToolCall, Usage};

use crate::wire::{ApiResponse, ApiResponseBlock};

/// Maps a vendor response into the normalized model.
///
/// Blocks map one to one and keep their order; tool_use blocks additionally
/// land in the flat `tool_calls` list. The vendor's stop_reason passes
/// through verbatim as the finish reason.
pub fn normalize_response(response: &ApiResponse) -> ChatResponse {
    let mut content = Vec::with_capacity(response.content.len());
    let mut tool_calls = Vec::new();

    for block in &response.content {
        match block {
            ApiResponseBlock::Text { text } => {
                content.push(ResponseBlock::Text { text: text.clone() });
            }
            ApiResponseBlock::Thinking { thinking, signature } => {
                content.push(ResponseBlock::Thinking {
                    thinking: thinking.clone(),
                    signature: signature.clone(),
                });
            }
            ApiResponseBlock::ToolUse { id, name, input } => {
                content.push(ResponseBlock::ToolCall {
                    id: id.clone(),
                    name: name.clone(),
                    input: input.clone(),
                });
                tool_calls.push(ToolCall::new(id.clone(), name.clone(), input.clone()));
            }
        }
    }

    ChatResponse {
        content,
        tool_calls: if tool_calls.is_empty() {
            None
        } else {
            Some(tool_calls)
        },
        usage: Usage::new(response.usage.input_tokens, response.usage.output_tokens),
        finish_reason: response.stop_reason.clone(),
    }
}

/// Drops tool calls whose argument payload is absent or an empty object.
///
/// Claude sometimes generates tool_use blocks with empty input. They carry
/// nothing executable, so they are filtered from the flat list and logged;
/// the raw response blocks keep the original invocation.
pub fn filter_tool_calls(calls: Vec<ToolCall>) -> Vec<ToolCall> {
    let before = calls.len();
    let kept: Vec<ToolCall> = calls
        .into_iter()
        .filter(|call| {
            if call.has_arguments() {
                true
            } else {
                log::debug!(
                    "dropping tool call '{}' ({}) with empty arguments",
                    call.name,
                    call.id
                );
                false
            }
        })
        .collect();

    let dropped = before - kept.len();
    if dropped > 0 {
        log::info!("filtered {} tool call(s) with empty arguments", dropped);
    }
    kept
}
