//! Chat transcript and endpoint wire types for chatrelay.
//!
//! A transcript is the ordered message history of one session. The request
//! and reply types mirror the JSON bodies of the chat endpoint.

use serde::{Deserialize, Serialize};

// Re-export the message types from the llm module (used in both contexts).
pub use crate::llm::{Message, MessageRole};

/// Ordered message history for one session.
///
/// Insertion order is meaningful: the whole transcript is replayed to the
/// responder as dialogue history on every turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the end of the transcript.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl From<Vec<Message>> for Transcript {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

/// Inbound body of the chat endpoint.
///
/// Both fields are optional at the wire level so that a missing field is
/// reported as an invalid request rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: Option<String>,
}

/// Result of one handled chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub reply: String,
    /// Whether `reply` is the fallback text substituted after a responder failure.
    #[serde(skip)]
    pub fallback: bool,
}
