//! Tool-sequence validation.
//!
//! Scans a converted turn list left to right and rejects the first
//! structural defect found. The repair pass fixes missing results before
//! validation runs; what remains here is unfixable by construction, so the
//! provider aborts before any network I/O.

use crate::error::ProviderError;
use crate::wire::{ApiRole, ApiTurn};

/// Validates tool_use/tool_result pairing across the whole turn list.
///
/// Checks, in order, for every assistant turn with tool_use blocks:
/// 1. a following turn exists;
/// 2. the following turn is a user turn carrying tool_result blocks;
/// 3. every tool_use id has a matching tool_result id.
///
/// And for every user turn with tool_result blocks: each result id matches a
/// tool_use id in the immediately preceding assistant turn. Turn lists with
/// no tool blocks always pass.
pub fn validate_tool_sequences(turns: &[ApiTurn]) -> Result<(), ProviderError> {
    for (i, turn) in turns.iter().enumerate() {
        if turn.role == ApiRole::Assistant {
            let tool_use_ids = turn.tool_use_ids();
            if tool_use_ids.is_empty() {
                continue;
            }

            let next = match turns.get(i + 1) {
                Some(next) => next,
                None => {
                    return Err(ProviderError::ToolSequence(format!(
                        "message {}: assistant tool_use (ids: {}) has no following message",
                        i,
                        tool_use_ids.join(", ")
                    )));
                }
            };

            let result_ids = next.tool_result_ids();
            if next.role != ApiRole::User || result_ids.is_empty() {
                return Err(ProviderError::ToolSequence(format!(
                    "message {}: expected 'user' with tool_results after assistant tool_use, \
                     found '{}'",
                    i + 1,
                    next.role.as_str()
                )));
            }

            for id in &tool_use_ids {
                if !result_ids.contains(id) {
                    return Err(ProviderError::ToolSequence(format!(
                        "message {}: tool_use '{}' is missing matching tool_result in the \
                         following message",
                        i, id
                    )));
                }
            }
        }

        if turn.role == ApiRole::User {
            let result_ids = turn.tool_result_ids();
            if result_ids.is_empty() {
                continue;
            }

            let preceding_use_ids: Vec<&str> = match i.checked_sub(1).and_then(|p| turns.get(p)) {
                Some(prev) if prev.role == ApiRole::Assistant => prev.tool_use_ids(),
                _ => Vec::new(),
            };
            for id in &result_ids {
                if !preceding_use_ids.contains(id) {
                    return Err(ProviderError::ToolSequence(format!(
                        "message {}: tool_result without matching tool_use (id '{}')",
                        i, id
                    )));
                }
            }
        }
    }

    Ok(())
}
