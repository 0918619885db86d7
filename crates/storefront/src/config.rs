//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CONFEITARIA_ENV` - `development` or `production` (default: production)
//! - `CONFEITARIA_DATA_DIR` - Directory for the saved order
//!   (default: platform local data dir + `confeitaria`, else `./.confeitaria`)
//! - `CONFEITARIA_STORAGE_KEY` - Record key (default: `lorena-felicio-order`)
//! - `CONFEITARIA_SAVE_DEBOUNCE_MS` - Delay before saving edits (default: 500)
//! - `CONFEITARIA_WHATSAPP_PHONE` - Digits-only phone for the deep link

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::scheduler::DEFAULT_DEBOUNCE;
use crate::session::DEFAULT_STORAGE_KEY;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Whether debug affordances are enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("expected development or production, got {other:?}")),
        }
    }
}

/// Confeitaria application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Development or production mode
    pub environment: Environment,
    /// Directory holding the saved order record
    pub data_dir: PathBuf,
    /// Key of the saved order record
    pub storage_key: String,
    /// Delay between the last edit and the save
    pub save_debounce: Duration,
    /// Phone number the WhatsApp link opens, if fixed
    pub whatsapp_phone: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            data_dir: default_data_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            save_debounce: DEFAULT_DEBOUNCE,
            whatsapp_phone: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| get_optional_env(&lookup, key);

        let environment = match get("CONFEITARIA_ENV") {
            Some(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("CONFEITARIA_ENV".to_string(), e))?,
            None => Environment::default(),
        };

        let data_dir = get("CONFEITARIA_DATA_DIR").map_or_else(default_data_dir, PathBuf::from);

        let storage_key = get("CONFEITARIA_STORAGE_KEY")
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        validate_storage_key(&storage_key)?;

        let save_debounce = match get("CONFEITARIA_SAVE_DEBOUNCE_MS") {
            Some(value) => value.parse::<u64>().map(Duration::from_millis).map_err(|e| {
                ConfigError::InvalidEnvVar("CONFEITARIA_SAVE_DEBOUNCE_MS".to_string(), e.to_string())
            })?,
            None => DEFAULT_DEBOUNCE,
        };

        let whatsapp_phone = get("CONFEITARIA_WHATSAPP_PHONE");
        if let Some(phone) = &whatsapp_phone {
            validate_phone(phone)?;
        }

        Ok(Self {
            environment,
            data_dir,
            storage_key,
            save_debounce,
            whatsapp_phone,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, treating blank values as unset.
fn get_optional_env(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Platform local data directory, falling back to the working directory.
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir().map_or_else(|| PathBuf::from(".confeitaria"), |d| d.join("confeitaria"))
}

fn validate_storage_key(key: &str) -> Result<(), ConfigError> {
    let valid = key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
    if !valid {
        return Err(ConfigError::InvalidEnvVar(
            "CONFEITARIA_STORAGE_KEY".to_string(),
            "only letters, digits, '-' and '_' are allowed".to_string(),
        ));
    }
    Ok(())
}

fn validate_phone(phone: &str) -> Result<(), ConfigError> {
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidEnvVar(
            "CONFEITARIA_WHATSAPP_PHONE".to_string(),
            "must contain only digits (country code first, no '+')".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.storage_key, "lorena-felicio-order");
        assert_eq!(config.save_debounce, Duration::from_millis(500));
        assert_eq!(config.whatsapp_phone, None);
        assert!(config.data_dir.ends_with("confeitaria") || config.data_dir.ends_with(".confeitaria"));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("CONFEITARIA_ENV", "development"),
            ("CONFEITARIA_DATA_DIR", "/var/lib/doces"),
            ("CONFEITARIA_STORAGE_KEY", "pedido"),
            ("CONFEITARIA_SAVE_DEBOUNCE_MS", "0"),
            ("CONFEITARIA_WHATSAPP_PHONE", "5511999998888"),
        ])
        .unwrap();
        assert!(config.environment.is_development());
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/doces"));
        assert_eq!(config.storage_key, "pedido");
        assert_eq!(config.save_debounce, Duration::ZERO);
        assert_eq!(config.whatsapp_phone.as_deref(), Some("5511999998888"));
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = load(&[("CONFEITARIA_STORAGE_KEY", "  "), ("CONFEITARIA_ENV", "")]).unwrap();
        assert_eq!(config.storage_key, "lorena-felicio-order");
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_invalid_environment() {
        let err = load(&[("CONFEITARIA_ENV", "staging")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(var, _) if var == "CONFEITARIA_ENV"));
    }

    #[test]
    fn test_invalid_debounce() {
        assert!(load(&[("CONFEITARIA_SAVE_DEBOUNCE_MS", "-1")]).is_err());
        assert!(load(&[("CONFEITARIA_SAVE_DEBOUNCE_MS", "soon")]).is_err());
    }

    #[test]
    fn test_invalid_storage_key() {
        assert!(load(&[("CONFEITARIA_STORAGE_KEY", "../order")]).is_err());
    }

    #[test]
    fn test_invalid_phone() {
        assert!(load(&[("CONFEITARIA_WHATSAPP_PHONE", "+55 11 99999")]).is_err());
    }
}
