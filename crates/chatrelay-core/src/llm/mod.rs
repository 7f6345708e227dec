//! LLM provider abstraction for chatrelay.
//!
//! `LlmProvider` is the narrow interface to the external responder; concrete
//! implementations live in `chatrelay-infra`.

pub mod provider;
