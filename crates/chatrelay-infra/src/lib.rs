//! Infrastructure layer for chatrelay.
//!
//! Contains the implementations behind the ports defined in `chatrelay-core`:
//! the OpenAI-compatible responder, configuration file loading, and
//! environment-based credential lookup.

pub mod config;
pub mod llm;
pub mod secret;
