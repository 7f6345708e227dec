//! `chatrelay config` - show the effective configuration.

use chatrelay_infra::secret::EnvSecretProvider;
use chatrelay_types::config::RelayConfig;

/// Effective configuration as JSON, with whether the API key is available
/// in place of the key itself.
pub fn effective_config_json(config: &RelayConfig, has_api_key: bool) -> serde_json::Value {
    serde_json::json!({
        "server": config.server,
        "responder": config.responder,
        "fallback_reply": config.fallback_reply,
        "has_api_key": has_api_key,
    })
}

/// Print the effective configuration to stdout.
pub fn show_config(config: &RelayConfig) -> anyhow::Result<()> {
    let has_api_key = EnvSecretProvider::new()
        .responder_api_key(&config.responder)
        .is_some();
    let json = effective_config_json(config, has_api_key);
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
