//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field has a default, so an empty file is a valid
//! configuration.

pub mod api;
pub mod auth;
pub mod cache;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::api::ApiConfig;
pub use self::auth::AuthConfig;
pub use self::cache::CacheConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the TOML configuration file
/// merged with `CHORUS__*` variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote API settings.
    pub api: ApiConfig,
    /// Token persistence and login settings.
    pub auth: AuthConfig,
    /// Remote data cache settings.
    pub cache: CacheConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `path`, honouring `CHORUS__*` environment
    /// overrides. A missing file yields the defaults.
    pub fn load_from(path: &str) -> Result<Self, AppError> {
        Self::build(
            config::Config::builder().add_source(config::File::with_name(path).required(false)),
        )
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let config = builder
            .add_source(
                config::Environment::with_prefix("CHORUS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_token_policy() {
        let config = AppConfig::default();
        assert_eq!(config.auth.token_ttl_days, 30);
        assert!(!config.auth.exclusive_login);
        assert_eq!(config.auth.youth_course, 6);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let parsed: AppConfig = from_json(
            r#"{"api": {"base_url": "https://choir.example"}, "auth": {"exclusive_login": true}}"#,
        );
        assert_eq!(parsed.api.base_url, "https://choir.example");
        assert_eq!(parsed.api.timeout_seconds, 15);
        assert!(parsed.auth.exclusive_login);
        assert_eq!(parsed.auth.token_ttl_days, 30);
        assert_eq!(parsed.cache.max_capacity, 1_000);
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chorus.toml");
        std::fs::write(
            &path,
            "[auth]\ntoken_ttl_days = 7\n\n[cache]\ntime_to_live_seconds = 60\n",
        )
        .unwrap();

        let config = AppConfig::load_from(path.to_str().unwrap()).unwrap();

        assert_eq!(config.auth.token_ttl_days, 7);
        assert_eq!(config.cache.time_to_live_seconds, 60);
        assert_eq!(config.auth.youth_course, 6);
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let config = AppConfig::load_from(path.to_str().unwrap()).unwrap();

        assert_eq!(config.api.timeout_seconds, 15);
        assert_eq!(config.auth.token_ttl_days, 30);
    }

    fn from_json(json: &str) -> AppConfig {
        serde_json::from_str(json).unwrap()
    }
}
