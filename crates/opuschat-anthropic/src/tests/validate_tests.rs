use serde_json::json;

use crate::repair::repair_tool_sequences;
use crate::validate::validate_tool_sequences;
use crate::wire::{ApiBlock, ApiContent, ApiTurn};

fn tool_use(id: &str, name: &str) -> ApiBlock {
    ApiBlock::ToolUse {
        id: id.to_string(),
        name: name.to_string(),
        input: json!({}),
    }
}

fn tool_result(id: &str, content: &str) -> ApiBlock {
    ApiBlock::ToolResult {
        tool_use_id: id.to_string(),
        content: content.to_string(),
    }
}

fn error_message(turns: &[ApiTurn]) -> String {
    match validate_tool_sequences(turns) {
        Err(e) => e.to_string(),
        Ok(()) => panic!("expected validation to fail"),
    }
}

#[test]
fn test_validation_passes_correct_pair() {
    let turns = vec![
        ApiTurn::assistant(ApiContent::Blocks(vec![tool_use("toolu_123", "bash")])),
        ApiTurn::user(ApiContent::Blocks(vec![tool_result(
            "toolu_123",
            "file1.txt\nfile2.txt",
        )])),
    ];
    assert!(validate_tool_sequences(&turns).is_ok());
}

#[test]
fn test_validation_passes_multiple_tool_pairs() {
    let turns = vec![
        ApiTurn::assistant(ApiContent::Blocks(vec![
            tool_use("toolu_1", "bash"),
            tool_use("toolu_2", "read"),
        ])),
        ApiTurn::user(ApiContent::Blocks(vec![
            tool_result("toolu_1", "bash result"),
            tool_result("toolu_2", "file content"),
        ])),
    ];
    assert!(validate_tool_sequences(&turns).is_ok());
}

#[test]
fn test_validation_passes_conversation_without_tools() {
    let turns = vec![
        ApiTurn::user_text("Hello"),
        ApiTurn::assistant(ApiContent::Text("Hi there!".to_string())),
        ApiTurn::user_text("How are you?"),
        ApiTurn::assistant(ApiContent::Text("I'm doing well, thanks!".to_string())),
    ];
    assert!(validate_tool_sequences(&turns).is_ok());
}

#[test]
fn test_validation_rejects_tool_use_with_no_following_message() {
    let turns = vec![ApiTurn::assistant(ApiContent::Blocks(vec![tool_use(
        "toolu_orphan",
        "bash",
    )]))];
    let message = error_message(&turns);
    assert!(message.contains("no following message"));
    assert!(message.contains("toolu_orphan"));
}

#[test]
fn test_validation_rejects_wrong_next_role() {
    let turns = vec![
        ApiTurn::assistant(ApiContent::Blocks(vec![tool_use("toolu_123", "bash")])),
        ApiTurn::assistant(ApiContent::Text("this shouldn't be here".to_string())),
    ];
    let message = error_message(&turns);
    assert!(message.contains("expected 'user' with tool_results"));
}

#[test]
fn test_validation_rejects_user_turn_without_results() {
    let turns = vec![
        ApiTurn::assistant(ApiContent::Blocks(vec![tool_use("toolu_123", "bash")])),
        ApiTurn::user_text("just words"),
    ];
    let message = error_message(&turns);
    assert!(message.contains("expected 'user' with tool_results"));
}

#[test]
fn test_validation_rejects_missing_result_id() {
    let turns = vec![
        ApiTurn::assistant(ApiContent::Blocks(vec![
            tool_use("toolu_1", "bash"),
            tool_use("toolu_2", "read"),
        ])),
        ApiTurn::user(ApiContent::Blocks(vec![tool_result("toolu_1", "only one")])),
    ];
    let message = error_message(&turns);
    assert!(message.contains("missing matching tool_result"));
    assert!(message.contains("toolu_2"));
}

#[test]
fn test_validation_rejects_orphaned_tool_result() {
    // Stale result left behind by compaction or a retry
    let turns = vec![
        ApiTurn::assistant(ApiContent::Blocks(vec![tool_use("toolu_correct", "bash")])),
        ApiTurn::user(ApiContent::Blocks(vec![
            tool_result("toolu_correct", "correct result"),
            tool_result("toolu_stale", "orphaned from earlier"),
        ])),
    ];
    let message = error_message(&turns);
    assert!(message.contains("tool_result without matching tool_use"));
    assert!(message.contains("toolu_stale"));
}

#[test]
fn test_validation_rejects_result_with_no_preceding_assistant() {
    let turns = vec![ApiTurn::user(ApiContent::Blocks(vec![tool_result(
        "toolu_nowhere",
        "result",
    )]))];
    let message = error_message(&turns);
    assert!(message.contains("tool_result without matching tool_use"));
}

#[test]
fn test_first_violation_wins() {
    // Both a wrong-role follower (turn 0/1) and an orphaned result (turn 2)
    let turns = vec![
        ApiTurn::assistant(ApiContent::Blocks(vec![tool_use("toolu_a", "bash")])),
        ApiTurn::assistant(ApiContent::Text("wrong".to_string())),
        ApiTurn::user(ApiContent::Blocks(vec![tool_result("toolu_stale", "old")])),
    ];
    let message = error_message(&turns);
    assert!(message.contains("expected 'user' with tool_results"));
}

#[test]
fn test_repaired_sequences_always_validate() {
    let damaged = vec![
        ApiTurn::user_text("Run ls"),
        ApiTurn::assistant(ApiContent::Blocks(vec![tool_use("toolu_123", "bash")])),
        ApiTurn::user_text("Thanks"),
        ApiTurn::assistant(ApiContent::Blocks(vec![
            tool_use("toolu_a", "read"),
            tool_use("toolu_b", "bash"),
        ])),
        ApiTurn::user(ApiContent::Blocks(vec![tool_result("toolu_a", "partial")])),
        ApiTurn::assistant(ApiContent::Blocks(vec![tool_use("toolu_last", "bash")])),
    ];
    let (repaired, count, _) = repair_tool_sequences(damaged);
    assert_eq!(count, 3);
    assert!(validate_tool_sequences(&repaired).is_ok());
}
