//! HTTP API layer for chatrelay.
//!
//! Axum-based API exposing the chat endpoint, a transcript read endpoint,
//! and a health check, with CORS and request tracing.

pub mod error;
pub mod handlers;
pub mod router;
