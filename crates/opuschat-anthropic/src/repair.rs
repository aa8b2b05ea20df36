//! Tool-sequence repair.
//!
//! An interrupted session can leave an assistant turn's tool_use blocks
//! without the tool_result blocks the vendor requires in the very next user
//! turn. Rather than reject the transcript, the repair pass synthesizes a
//! placeholder result for every outstanding tool_use id so the conversation
//! can resume. Orphaned tool_result blocks (results with no matching
//! tool_use) are NOT touched here; masking them would hide upstream
//! compaction and retry bugs, so the validator rejects them instead.

use crate::wire::{ApiBlock, ApiContent, ApiRole, ApiTurn};

/// Placeholder content for a synthesized tool_result
pub const SYSTEM_ERROR_PLACEHOLDER: &str =
    "SYSTEM ERROR: tool result was lost and could not be recovered. \
     The tool may have failed or the session was interrupted before the \
     result was recorded.";

/// Which defect a synthesized tool_result fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairKind {
    /// The following user turn was absent entirely (or carried no results)
    MissingResultTurn,
    /// The following user turn existed but was missing this id
    MissingResultBlock,
}

/// One synthesized tool_result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairRecord {
    pub tool_use_id: String,
    pub kind: RepairKind,
}

/// Repairs incomplete tool sequences by synthesizing placeholder results.
///
/// Returns the repaired turns, the number of synthesized results, and one
/// record per synthesized result. Correct blocks are never reordered or
/// removed, and the output always satisfies: every assistant turn with
/// tool_use blocks is immediately followed by a user turn whose tool_result
/// ids are a superset of the tool_use ids. Running the repair again on its
/// own output synthesizes nothing.
pub fn repair_tool_sequences(turns: Vec<ApiTurn>) -> (Vec<ApiTurn>, usize, Vec<RepairRecord>) {
    let mut repaired: Vec<ApiTurn> = Vec::with_capacity(turns.len());
    let mut records: Vec<RepairRecord> = Vec::new();

    let mut iter = turns.into_iter().peekable();
    while let Some(turn) = iter.next() {
        let tool_use_ids: Vec<String> = if turn.role == ApiRole::Assistant {
            turn.tool_use_ids().iter().map(|id| id.to_string()).collect()
        } else {
            Vec::new()
        };
        repaired.push(turn);

        if tool_use_ids.is_empty() {
            continue;
        }

        let user_follows = matches!(iter.peek(), Some(next) if next.role == ApiRole::User);
        if !user_follows {
            // Result turn missing entirely, or a wrong-role turn follows:
            // a synthetic user turn is placed right after the assistant turn
            repaired.push(synthetic_result_turn(&tool_use_ids, &mut records));
            continue;
        }

        if let Some(mut next) = iter.next() {
            let result_ids: Vec<String> = next
                .tool_result_ids()
                .iter()
                .map(|id| id.to_string())
                .collect();
            if result_ids.is_empty() {
                // Following user turn carries no results: its content is
                // replaced with the synthetic result blocks
                next.content = synthetic_result_blocks(
                    &tool_use_ids,
                    RepairKind::MissingResultTurn,
                    &mut records,
                );
            } else {
                let missing: Vec<String> = tool_use_ids
                    .iter()
                    .filter(|id| !result_ids.contains(*id))
                    .cloned()
                    .collect();
                if !missing.is_empty() {
                    append_missing_results(&mut next, &missing, &mut records);
                }
            }
            repaired.push(next);
        }
    }

    let count = records.len();
    (repaired, count, records)
}

fn synthetic_result_turn(tool_use_ids: &[String], records: &mut Vec<RepairRecord>) -> ApiTurn {
    ApiTurn::user(synthetic_result_blocks(
        tool_use_ids,
        RepairKind::MissingResultTurn,
        records,
    ))
}

fn synthetic_result_blocks(
    tool_use_ids: &[String],
    kind: RepairKind,
    records: &mut Vec<RepairRecord>,
) -> ApiContent {
    let blocks = tool_use_ids
        .iter()
        .map(|id| synthesize(id, kind, records))
        .collect();
    ApiContent::Blocks(blocks)
}

fn append_missing_results(turn: &mut ApiTurn, missing: &[String], records: &mut Vec<RepairRecord>) {
    let appended: Vec<ApiBlock> = missing
        .iter()
        .map(|id| synthesize(id, RepairKind::MissingResultBlock, records))
        .collect();
    match &mut turn.content {
        ApiContent::Blocks(blocks) => blocks.extend(appended),
        // A turn with result ids always has block content already
        ApiContent::Text(text) => {
            let mut blocks = vec![ApiBlock::Text {
                text: std::mem::take(text),
            }];
            blocks.extend(appended);
            turn.content = ApiContent::Blocks(blocks);
        }
    }
}

fn synthesize(tool_use_id: &str, kind: RepairKind, records: &mut Vec<RepairRecord>) -> ApiBlock {
    log::warn!(
        "synthesizing tool_result for interrupted tool_use '{}'",
        tool_use_id
    );
    records.push(RepairRecord {
        tool_use_id: tool_use_id.to_string(),
        kind,
    });
    ApiBlock::ToolResult {
        tool_use_id: tool_use_id.to_string(),
        content: SYSTEM_ERROR_PLACEHOLDER.to_string(),
    }
}
