//! Environment variable secret lookup.
//!
//! The responder's API key is never stored in the config file; the config
//! only names the environment variable that holds it. A `.env` file can
//! supply that variable for local development.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use chatrelay_types::config::ResponderConfig;

/// Read-only secret provider backed by environment variables.
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    /// Create a new environment variable secret provider.
    pub fn new() -> Self {
        Self
    }

    /// Look up `key` as an environment variable name.
    ///
    /// Missing, empty, and non-Unicode values are all treated as not found.
    pub fn get(&self, key: &str) -> Option<SecretString> {
        match std::env::var(key) {
            Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val)),
            Ok(_) => None,
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => None,
        }
    }

    /// Resolve the API key for the configured responder.
    pub fn responder_api_key(&self, config: &ResponderConfig) -> Option<SecretString> {
        self.get(&config.api_key_env)
    }
}

/// Load variables from a `.env` file into the process environment.
///
/// With `None`, searches the working directory and its ancestors. Variables
/// already set in the environment are not overridden. Returns the path of the
/// loaded file, or `None` when no file was found or it could not be parsed.
pub fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(path) => dotenv::from_path(path).ok().map(|()| path.to_path_buf()),
        None => dotenv::dotenv().ok(),
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}
