//! Shared domain types for chatrelay.
//!
//! Messages, transcripts, the inbound/outbound wire shapes, LLM request types,
//! configuration, and their error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
