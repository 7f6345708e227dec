//! Session-scoped conversation state and the chat turn handler.
//!
//! - `ConversationStore`: in-memory session id -> transcript map with per-session turn locks
//! - `ChatService`: validates a request, runs one turn against the responder, records it

pub mod service;
pub mod store;
