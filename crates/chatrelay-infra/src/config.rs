//! Configuration loader for chatrelay.
//!
//! Reads a TOML file into [`RelayConfig`]. An explicitly requested file must
//! exist and parse; the implicit `./chatrelay.toml` falls back to defaults
//! when missing or malformed.

use std::path::Path;

use chatrelay_types::config::RelayConfig;
use chatrelay_types::error::ConfigError;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "chatrelay.toml";

/// Load configuration from `path`, or from `./chatrelay.toml` when `None`.
///
/// - Explicit path: read or parse failures are returned as [`ConfigError`].
/// - Implicit path: a missing file yields [`RelayConfig::default()`]; an
///   unreadable or malformed file logs a warning and yields the default.
///
/// The result is validated in both cases.
pub async fn load_config(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    let config = match path {
        Some(path) => load_explicit(path).await?,
        None => load_implicit(Path::new(DEFAULT_CONFIG_FILE)).await,
    };

    config.validate()?;
    Ok(config)
}

async fn load_explicit(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;

    let config = toml::from_str::<RelayConfig>(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;

    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

async fn load_implicit(path: &Path) -> RelayConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No {} found, using defaults", path.display());
            return RelayConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return RelayConfig::default();
        }
    };

    match toml::from_str::<RelayConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            RelayConfig::default()
        }
    }
}
