//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `INVENTORY_API_URL` - Base URL of the inventory service
//!
//! ## Optional
//! - `INVENTORY_API_TOKEN` - Bearer token for the inventory service
//! - `CART_STORAGE_PATH` - Path of the cart storage file (default: cart-storage.json)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Inventory service configuration
    pub inventory: InventoryConfig,
    /// Path of the durable cart storage file
    pub storage_path: PathBuf,
}

/// Inventory service configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct InventoryConfig {
    /// Base URL of the inventory service (e.g., <http://localhost:3333>)
    pub base_url: String,
    /// Bearer token for the inventory service, if it requires one
    pub api_token: Option<SecretString>,
}

impl std::fmt::Debug for InventoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let inventory = InventoryConfig::from_env()?;
        let storage_path =
            PathBuf::from(get_env_or_default("CART_STORAGE_PATH", "cart-storage.json"));

        Ok(Self {
            inventory,
            storage_path,
        })
    }
}

impl InventoryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_required_env("INVENTORY_API_URL")?;
        validate_base_url(&base_url, "INVENTORY_API_URL")?;

        Ok(Self {
            base_url,
            api_token: get_optional_env("INVENTORY_API_TOKEN").map(SecretString::from),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a base URL is an absolute http(s) URL.
fn validate_base_url(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let url = reqwest::Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url_accepts_http() {
        assert!(validate_base_url("http://localhost:3333", "TEST_VAR").is_ok());
        assert!(validate_base_url("https://inventory.guavamarket.dev", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_validate_base_url_rejects_relative() {
        let result = validate_base_url("/api/inventory", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_validate_base_url_rejects_other_schemes() {
        let result = validate_base_url("ftp://inventory.local", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_inventory_config_debug_redacts_token() {
        let config = InventoryConfig {
            base_url: "http://localhost:3333".to_string(),
            api_token: Some(SecretString::from("super_secret_token")),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("http://localhost:3333"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token"));
    }
}
