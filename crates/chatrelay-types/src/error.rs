use thiserror::Error;

/// Errors surfaced to callers of the chat endpoint.
///
/// Responder failures are not part of this enum: they are recovered inside
/// the handler by substituting the fallback reply.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors from loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("failed to parse config file '{path}': {reason}")]
    Parse { path: String, reason: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
