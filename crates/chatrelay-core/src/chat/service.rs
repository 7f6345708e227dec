//! Chat service running one conversation turn per request.
//!
//! ChatService coordinates the ConversationStore and the LlmProvider:
//! validate the request, append the user message, ask the responder for a
//! reply using the whole transcript as history, append the reply, persist.
//!
//! Responder failures never reach the caller. The service substitutes a
//! fixed fallback reply and records it like any other assistant message, so
//! the transcript stays a strict user/assistant alternation.

use tracing::{Instrument, debug, info_span, warn};

use chatrelay_types::chat::{ChatReply, Message, Transcript};
use chatrelay_types::config::{DEFAULT_FALLBACK_REPLY, ResponderConfig};
use chatrelay_types::error::ChatError;
use chatrelay_types::llm::CompletionRequest;

use crate::chat::store::ConversationStore;
use crate::llm::provider::LlmProvider;

/// Fixed generation parameters sent with every completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl From<&ResponderConfig> for GenerationParams {
    fn from(config: &ResponderConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::from(&ResponderConfig::default())
    }
}

/// Handles chat turns against a single responder.
///
/// Generic over `LlmProvider` so tests can inject scripted responders and
/// the binary pins it to the concrete infra implementation.
pub struct ChatService<P: LlmProvider> {
    store: ConversationStore,
    provider: P,
    params: GenerationParams,
    fallback_reply: String,
}

impl<P: LlmProvider> ChatService<P> {
    /// Create a chat service over an existing store and provider.
    pub fn new(store: ConversationStore, provider: P, params: GenerationParams) -> Self {
        Self {
            store,
            provider,
            params,
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
        }
    }

    /// Override the reply used when the responder fails.
    pub fn with_fallback_reply(mut self, reply: impl Into<String>) -> Self {
        self.fallback_reply = reply.into();
        self
    }

    /// Access the conversation store.
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// The reply substituted on responder failure.
    pub fn fallback_reply(&self) -> &str {
        &self.fallback_reply
    }

    /// Current transcript for a session (empty and created if unknown).
    pub fn transcript(&self, session_id: &str) -> Transcript {
        self.store.get(session_id)
    }

    /// Run one chat turn for `session_id`.
    ///
    /// Returns `InvalidRequest` without touching the store or the responder
    /// when either argument is empty. Otherwise always succeeds: the reply is
    /// either the responder's text (trimmed) or the fallback reply.
    pub async fn handle(&self, session_id: &str, message: &str) -> Result<ChatReply, ChatError> {
        if session_id.is_empty() || message.is_empty() {
            return Err(ChatError::InvalidRequest(
                "Missing session_id or message".to_string(),
            ));
        }

        let _turn = self.store.lock_session(session_id).await;

        let mut transcript = self.store.get(session_id);
        transcript.push(Message::user(message));

        let request = self.build_request(&transcript);
        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            session_id = %session_id,
            history_len = request.messages.len(),
        );

        let (reply, fallback) = match self.provider.complete(&request).instrument(span).await {
            Ok(response) => {
                debug!(
                    session_id = %session_id,
                    response_id = %response.id,
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "Responder returned a reply"
                );
                (response.content.trim().to_string(), false)
            }
            Err(err) => {
                warn!(
                    session_id = %session_id,
                    provider = self.provider.name(),
                    error = %err,
                    "Responder failed, substituting fallback reply"
                );
                (self.fallback_reply.clone(), true)
            }
        };

        transcript.push(Message::assistant(reply.clone()));
        let messages = transcript.len();
        self.store.update(session_id, transcript);

        debug!(session_id = %session_id, messages, fallback, "Turn recorded");

        Ok(ChatReply { reply, fallback })
    }

    fn build_request(&self, transcript: &Transcript) -> CompletionRequest {
        CompletionRequest {
            model: self.params.model.clone(),
            messages: transcript.messages().to_vec(),
            max_tokens: self.params.max_tokens,
            temperature: Some(self.params.temperature),
        }
    }
}
