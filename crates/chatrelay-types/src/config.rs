//! Configuration types for chatrelay.
//!
//! `RelayConfig` represents the top-level `chatrelay.toml` that controls the
//! listening address, allowed CORS origins, the responder's fixed generation
//! parameters, and the fallback reply.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Reply substituted when the responder fails.
pub const DEFAULT_FALLBACK_REPLY: &str =
    "I'm sorry, I'm having trouble generating a response right now. Please try again later.";

/// Top-level configuration. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub responder: ResponderConfig,

    /// Reply returned (and recorded) when the responder call fails.
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by CORS. A single `"*"` allows any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

/// External responder settings.
///
/// The generation parameters are fixed configuration, never user-controlled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponderConfig {
    /// Human-readable provider name used in logs (e.g., "openai").
    #[serde(default = "default_provider_name")]
    pub provider_name: String,

    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum number of output tokens per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Upper bound on a single responder call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_fallback_reply() -> String {
    DEFAULT_FALLBACK_REPLY.to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_provider_name() -> String {
    "openai".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_max_tokens() -> u32 {
    150
}

fn default_temperature() -> f64 {
    0.7
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            responder: ResponderConfig::default(),
            fallback_reply: default_fallback_reply(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            provider_name: default_provider_name(),
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl RelayConfig {
    /// Reject values the responder or server cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.responder.model.trim().is_empty() {
            return Err(ConfigError::Invalid("responder.model must not be empty".to_string()));
        }
        if self.responder.max_tokens == 0 {
            return Err(ConfigError::Invalid(
                "responder.max_tokens must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.responder.temperature) {
            return Err(ConfigError::Invalid(format!(
                "responder.temperature must be within 0.0..=2.0, got {}",
                self.responder.temperature
            )));
        }
        if self.responder.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "responder.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.fallback_reply.trim().is_empty() {
            return Err(ConfigError::Invalid("fallback_reply must not be empty".to_string()));
        }
        Ok(())
    }
}
