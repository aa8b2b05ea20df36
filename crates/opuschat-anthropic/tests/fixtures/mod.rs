use serde_json::{json, Value};
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Mock server utilities for testing the Anthropic provider
pub struct AnthropicMockServer {
    server: MockServer,
}

impl AnthropicMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Mock a successful text completion
    pub async fn mock_success(&self, response_content: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-api-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_test123",
                "type": "message",
                "role": "assistant",
                "content": [{
                    "type": "text",
                    "text": response_content
                }],
                "model": "claude-sonnet-4-5",
                "stop_reason": "end_turn",
                "stop_sequence": null,
                "usage": {
                    "input_tokens": 10,
                    "output_tokens": 20
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a completion that answers with the given content blocks
    pub async fn mock_blocks(&self, content: Value, stop_reason: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_test456",
                "type": "message",
                "role": "assistant",
                "content": content,
                "model": "claude-sonnet-4-5",
                "stop_reason": stop_reason,
                "stop_sequence": null,
                "usage": {
                    "input_tokens": 25,
                    "output_tokens": 17
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock an API error response
    pub async fn mock_error(&self, status: u16, error_type: &str, error_message: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "type": "error",
                "error": {
                    "type": error_type,
                    "message": error_message
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Every request the server received so far
    pub async fn received_requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Body of the only received request, parsed as JSON
    pub async fn single_request_body(&self) -> Value {
        let requests = self.received_requests().await;
        assert_eq!(requests.len(), 1, "expected exactly one request");
        serde_json::from_slice(&requests[0].body).expect("request body is JSON")
    }
}
