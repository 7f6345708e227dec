//! LLM provider implementations.
//!
//! Contains the concrete implementation of the [`LlmProvider`] trait defined
//! in `chatrelay-core`: an OpenAI-compatible chat completions client.
//!
//! [`LlmProvider`]: chatrelay_core::llm::provider::LlmProvider

pub mod openai_compat;
