//! LlmProvider trait definition.
//!
//! This is the core abstraction the external responder implements.
//! Uses RPITIT for `complete`, matching the rest of the crate's async traits.

use chatrelay_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends (OpenAI and compatible APIs).
///
/// A call either yields generated text or a typed [`LlmError`]; callers decide
/// how to degrade, providers never substitute replies themselves.
///
/// Implementations live in chatrelay-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
