//! LLM request/response types for chatrelay.
//!
//! These types model the data shapes exchanged with the external responder:
//! role-tagged messages, completion requests, usage tracking, and errors.

use serde::{Deserialize, Serialize};

/// Role of a message in an LLM conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single role-tagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request to an LLM provider for a completion.
///
/// `messages` carries the full dialogue history in order; the generation
/// parameters come from configuration and are never user-controlled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Response from an LLM provider for a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
    pub usage: Usage,
}

/// Token usage for a completion request/response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("context length exceeded")]
    ContextLengthExceeded,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_wire_names() {
        for (role, name) in [
            (MessageRole::System, "\"system\""),
            (MessageRole::User, "\"user\""),
            (MessageRole::Assistant, "\"assistant\""),
        ] {
            assert_eq!(serde_json::to_string(&role).unwrap(), name);
            assert_eq!(serde_json::from_str::<MessageRole>(name).unwrap(), role);
        }
    }

    #[test]
    fn test_message_role_rejects_unknown() {
        assert!(serde_json::from_str::<MessageRole>("\"tool\"").is_err());
    }

    #[test]
    fn test_message_wire_shape() {
        let msg = Message::user("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hi"}));
    }

    #[test]
    fn test_completion_request_omits_missing_temperature() {
        let request = CompletionRequest {
            model: "gpt-4".to_string(),
            messages: vec![Message::assistant("hello")],
            max_tokens: 150,
            temperature: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn test_llm_error_display() {
        assert_eq!(LlmError::Timeout(30).to_string(), "request timed out after 30s");
        let err = LlmError::Provider {
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "provider error: boom");
    }
}
