//! Application state wiring the chat service together.
//!
//! AppState holds the concrete service instance used by the HTTP handlers.
//! `ChatService` is generic over the responder trait, but AppState pins it to
//! the concrete infra implementation.

use std::sync::Arc;

use anyhow::Context;

use chatrelay_core::chat::service::{ChatService, GenerationParams};
use chatrelay_core::chat::store::ConversationStore;
use chatrelay_infra::llm::openai_compat::OpenAiCompatibleProvider;
use chatrelay_infra::llm::openai_compat::config::OpenAiCompatConfig;
use chatrelay_infra::secret::EnvSecretProvider;
use chatrelay_types::config::RelayConfig;

/// Concrete type alias for the service generic pinned to the infra provider.
pub type ConcreteChatService = ChatService<OpenAiCompatibleProvider>;

/// Shared application state.
///
/// Cloned into every request; the conversation store inside the service is
/// the single process-wide session map.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub config: Arc<RelayConfig>,
}

impl AppState {
    /// Initialize the application state: resolve the API key, wire the service.
    pub fn init(config: RelayConfig) -> anyhow::Result<Self> {
        let api_key = EnvSecretProvider::new()
            .responder_api_key(&config.responder)
            .with_context(|| {
                format!(
                    "no API key found: set the {} environment variable",
                    config.responder.api_key_env
                )
            })?;

        let provider = OpenAiCompatibleProvider::new(OpenAiCompatConfig::from_responder(
            &config.responder,
            api_key,
        ));

        Ok(Self::from_parts(config, provider))
    }

    /// Wire state around an already constructed provider.
    pub fn from_parts(config: RelayConfig, provider: OpenAiCompatibleProvider) -> Self {
        let chat_service = ChatService::new(
            ConversationStore::new(),
            provider,
            GenerationParams::from(&config.responder),
        )
        .with_fallback_reply(config.fallback_reply.clone());

        Self {
            chat_service: Arc::new(chat_service),
            config: Arc::new(config),
        }
    }
}

/// State whose responder points at a closed local port, so every responder
/// call fails fast and the fallback path is exercised.
#[cfg(test)]
pub fn unreachable_responder_state() -> AppState {
    use std::time::Duration;

    let config = RelayConfig::default();
    let provider = OpenAiCompatibleProvider::new(OpenAiCompatConfig {
        provider_name: "unreachable".to_string(),
        base_url: "http://127.0.0.1:9/v1".to_string(),
        api_key: secrecy::SecretString::from("sk-test".to_string()),
        model: config.responder.model.clone(),
        timeout: Duration::from_secs(2),
    });
    AppState::from_parts(config, provider)
}
