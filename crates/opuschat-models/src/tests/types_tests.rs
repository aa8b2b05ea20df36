use crate::types::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    assert_eq!(serde_json::to_string(&Role::Developer).unwrap(), "\"developer\"");
    assert_eq!(serde_json::to_string(&Role::Tool).unwrap(), "\"tool\"");
}

#[test]
fn test_message_content_text_serializes_as_plain_string() {
    let content = MessageContent::Text("hello".to_string());
    assert_eq!(serde_json::to_value(&content).unwrap(), json!("hello"));
}

#[test]
fn test_message_content_blocks_serialize_tagged() {
    let content = MessageContent::Blocks(vec![
        ContentBlock::Text {
            text: "look at this".to_string(),
        },
        ContentBlock::ToolUse {
            id: "toolu_01".to_string(),
            name: "read_file".to_string(),
            input: json!({"path": "src/main.rs"}),
        },
    ]);
    let value = serde_json::to_value(&content).unwrap();
    assert_eq!(value[0]["type"], "text");
    assert_eq!(value[1]["type"], "tool_use");
    assert_eq!(value[1]["id"], "toolu_01");
}

#[test]
fn test_message_content_deserializes_string_or_blocks() {
    let text: MessageContent = serde_json::from_value(json!("plain")).unwrap();
    assert_eq!(text, MessageContent::Text("plain".to_string()));

    let blocks: MessageContent = serde_json::from_value(json!([
        {"type": "tool_result", "tool_use_id": "toolu_01", "content": "ok"}
    ]))
    .unwrap();
    match blocks {
        MessageContent::Blocks(blocks) => {
            assert_eq!(blocks.len(), 1);
            assert_eq!(
                blocks[0],
                ContentBlock::ToolResult {
                    tool_use_id: "toolu_01".to_string(),
                    content: "ok".to_string(),
                }
            );
        }
        other => panic!("expected blocks, got {:?}", other),
    }
}

#[test]
fn test_message_constructors() {
    let user = Message::user("hi");
    assert_eq!(user.role, Role::User);
    assert_eq!(user.content.as_text(), Some("hi"));
    assert!(user.tool_calls.is_none());

    let tool = Message::tool_result("toolu_01", "file contents");
    assert_eq!(tool.role, Role::Tool);
    assert_eq!(tool.tool_call_id.as_deref(), Some("toolu_01"));

    let assistant = Message::assistant_with_tool_calls(
        "checking",
        vec![ToolCall::new("toolu_02", "list_files", json!({"pattern": "*"}))],
    );
    assert_eq!(assistant.role, Role::Assistant);
    assert_eq!(assistant.tool_calls.as_ref().unwrap().len(), 1);
}

#[test]
fn test_message_optional_fields_skipped_when_absent() {
    let json = serde_json::to_string(&Message::user("hi")).unwrap();
    assert!(!json.contains("tool_calls"));
    assert!(!json.contains("tool_call_id"));
    assert!(!json.contains("thinking"));
}

#[test]
fn test_thinking_signature_roundtrip() {
    let message = Message::assistant("done").with_thinking(Thinking {
        thinking: "considered the options".to_string(),
        signature: Some("sig_abc".to_string()),
    });
    let json = serde_json::to_string(&message).unwrap();
    let back: Message = serde_json::from_str(&json).unwrap();
    assert_eq!(back.thinking.unwrap().signature.as_deref(), Some("sig_abc"));
}

#[test]
fn test_tool_call_has_arguments() {
    assert!(!ToolCall::new("a", "tool", json!(null)).has_arguments());
    assert!(!ToolCall::new("b", "tool", json!({})).has_arguments());
    assert!(ToolCall::new("c", "tool", json!({"path": "x"})).has_arguments());
}

#[test]
fn test_usage_totals() {
    let usage = Usage::new(120, 45);
    assert_eq!(usage.total_tokens, 165);
}

#[test]
fn test_chat_response_helpers() {
    let response = ChatResponse {
        content: vec![
            ResponseBlock::Thinking {
                thinking: "hmm".to_string(),
                signature: None,
            },
            ResponseBlock::Text {
                text: "answer".to_string(),
            },
        ],
        tool_calls: None,
        usage: Usage::new(10, 20),
        finish_reason: Some("end_turn".to_string()),
    };
    assert_eq!(response.first_text(), Some("answer"));
    assert!(!response.has_tool_calls());
}
