//! Conversion from the normalized message model to vendor turns.
//!
//! Anthropic requires ALL tool_result blocks answering one assistant turn's
//! tool_use blocks to arrive batched in a SINGLE user turn, in order. The
//! converter enforces that batching; system messages leave the turn list and
//! become the request preamble; developer messages become context turns.

use opuschat_models::{ContentBlock, Message, MessageContent, Role, ToolSpec};

use crate::wire::{ApiBlock, ApiContent, ApiTool, ApiTurn};

/// Result of splitting and converting a request's messages
#[derive(Debug, Clone)]
pub struct ConvertedMessages {
    pub system: Option<String>,
    pub turns: Vec<ApiTurn>,
}

/// Splits a request's messages by role and converts them to vendor turns.
///
/// Developer messages are relocated to precede the whole conversation,
/// regardless of where they appeared. This reorders the transcript on
/// purpose: context carried by developer messages must be visible before the
/// turns that rely on it.
pub fn convert_request_messages(messages: &[Message]) -> ConvertedMessages {
    let system = system_preamble(messages);

    let mut turns: Vec<ApiTurn> = messages
        .iter()
        .filter(|message| message.role == Role::Developer)
        .map(context_turn)
        .collect();
    let context_count = turns.len();

    let conversation: Vec<Message> = messages
        .iter()
        .filter(|message| message.role != Role::System && message.role != Role::Developer)
        .cloned()
        .collect();
    turns.extend(convert_messages(&conversation));

    log::debug!(
        "converted {} messages into {} turns ({} context, system preamble: {})",
        messages.len(),
        turns.len(),
        context_count,
        system.is_some()
    );

    ConvertedMessages { system, turns }
}

/// Joins every system message's text into the request preamble.
/// Non-text system content contributes an empty string.
pub fn system_preamble(messages: &[Message]) -> Option<String> {
    let parts: Vec<&str> = messages
        .iter()
        .filter(|message| message.role == Role::System)
        .map(|message| message.content.as_text().unwrap_or(""))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n\n"))
    }
}

/// Converts conversation messages into vendor turns. System messages are
/// skipped (they belong in the preamble); developer messages encountered
/// here map to context turns in place.
pub fn convert_messages(messages: &[Message]) -> Vec<ApiTurn> {
    let mut turns = Vec::with_capacity(messages.len());
    let mut i = 0;

    while i < messages.len() {
        let message = &messages[i];
        match message.role {
            Role::System => {
                i += 1;
            }
            Role::Developer => {
                turns.push(context_turn(message));
                i += 1;
            }
            Role::Tool => {
                // Batch every consecutive tool message into one user turn
                let mut results = Vec::new();
                while i < messages.len() && messages[i].role == Role::Tool {
                    let tool_message = &messages[i];
                    let tool_use_id = match &tool_message.tool_call_id {
                        Some(id) => id.clone(),
                        None => {
                            log::warn!(
                                "tool message at index {} has no tool_call_id, using 'unknown'",
                                i
                            );
                            "unknown".to_string()
                        }
                    };
                    results.push(ApiBlock::ToolResult {
                        tool_use_id,
                        content: content_text(&tool_message.content),
                    });
                    i += 1;
                }
                turns.push(ApiTurn::user(ApiContent::Blocks(results)));
            }
            Role::Assistant => {
                turns.push(assistant_turn(message));
                i += 1;
            }
            Role::User => {
                turns.push(ApiTurn::user(map_content(&message.content)));
                i += 1;
            }
        }
    }

    turns
}

/// Maps tool declarations to the vendor schema
pub fn convert_tools(tools: &[ToolSpec]) -> Vec<ApiTool> {
    tools
        .iter()
        .map(|tool| ApiTool {
            name: tool.name.clone(),
            description: tool.description.clone(),
            input_schema: tool.parameters.clone(),
        })
        .collect()
}

fn context_turn(message: &Message) -> ApiTurn {
    ApiTurn::user_text(format!(
        "<context_file>\n{}\n</context_file>",
        content_text(&message.content)
    ))
}

fn assistant_turn(message: &Message) -> ApiTurn {
    let has_calls = message
        .tool_calls
        .as_ref()
        .map(|calls| !calls.is_empty())
        .unwrap_or(false);

    if !has_calls && message.thinking.is_none() {
        return ApiTurn::assistant(map_content(&message.content));
    }

    // Block order matters: thinking first, then text, then tool_use
    let mut blocks = Vec::new();
    if let Some(thinking) = &message.thinking {
        blocks.push(ApiBlock::Thinking {
            thinking: thinking.thinking.clone(),
            signature: thinking.signature.clone(),
        });
    }
    match &message.content {
        MessageContent::Text(text) if !text.is_empty() => blocks.push(ApiBlock::Text {
            text: text.clone(),
        }),
        MessageContent::Text(_) => {}
        MessageContent::Blocks(existing) => blocks.extend(existing.iter().map(map_block)),
    }
    if let Some(calls) = &message.tool_calls {
        for call in calls {
            blocks.push(ApiBlock::ToolUse {
                id: call.id.clone(),
                name: call.name.clone(),
                input: call.arguments.clone(),
            });
        }
    }

    ApiTurn::assistant(ApiContent::Blocks(blocks))
}

fn map_content(content: &MessageContent) -> ApiContent {
    match content {
        MessageContent::Text(text) => ApiContent::Text(text.clone()),
        MessageContent::Blocks(blocks) => {
            ApiContent::Blocks(blocks.iter().map(map_block).collect())
        }
    }
}

fn map_block(block: &ContentBlock) -> ApiBlock {
    match block {
        ContentBlock::Text { text } => ApiBlock::Text { text: text.clone() },
        ContentBlock::Thinking { thinking, signature } => ApiBlock::Thinking {
            thinking: thinking.clone(),
            signature: signature.clone(),
        },
        ContentBlock::ToolUse { id, name, input } => ApiBlock::ToolUse {
            id: id.clone(),
            name: name.clone(),
            input: input.clone(),
        },
        ContentBlock::ToolResult { tool_use_id, content } => ApiBlock::ToolResult {
            tool_use_id: tool_use_id.clone(),
            content: content.clone(),
        },
    }
}

fn content_text(content: &MessageContent) -> String {
    match content {
        MessageContent::Text(text) => text.clone(),
        MessageContent::Blocks(blocks) => blocks
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
