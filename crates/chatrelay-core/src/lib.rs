//! Business logic and trait definitions for chatrelay.
//!
//! This crate holds the conversation store, the chat turn handler, and the
//! `LlmProvider` port that the infrastructure layer implements. It depends
//! only on `chatrelay-types` -- never on `chatrelay-infra` or any HTTP crate.

pub mod chat;
pub mod llm;
