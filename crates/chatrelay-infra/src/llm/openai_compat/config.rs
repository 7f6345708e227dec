//! Configuration for the OpenAI-compatible provider.

use std::time::Duration;

use secrecy::SecretString;

use chatrelay_types::config::ResponderConfig;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Default model identifier, used when a request leaves `model` empty.
    pub model: String,
    /// Upper bound on a single completion call.
    pub timeout: Duration,
}

impl OpenAiCompatConfig {
    /// Build from the `[responder]` config section and a resolved API key.
    pub fn from_responder(config: &ResponderConfig, api_key: SecretString) -> Self {
        Self {
            provider_name: config.provider_name.clone(),
            base_url: config.base_url.clone(),
            api_key,
            model: config.model.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_from_responder_copies_settings() {
        let responder = ResponderConfig {
            provider_name: "local".to_string(),
            base_url: "http://localhost:11434/v1".to_string(),
            model: "llama3".to_string(),
            timeout_secs: 5,
            ..ResponderConfig::default()
        };
        let config = OpenAiCompatConfig::from_responder(&responder, SecretString::from("k".to_string()));
        assert_eq!(config.provider_name, "local");
        assert_eq!(config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.model, "llama3");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.api_key.expose_secret(), "k");
    }
}
