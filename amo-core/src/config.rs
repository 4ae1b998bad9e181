//! Client configuration management.
//!
//! Handles loading, saving, and accessing client configuration: account
//! credentials (long-lived access token and account subdomain), the base
//! domain the subdomain attaches to, extra HTTP headers, and logging
//! preferences. Configuration is persisted as TOML on disk and can be
//! overridden from the environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{AmoError, AmoResult};

/// Top-level client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AmoConfig {
    /// Account credentials and API root derivation.
    #[serde(default)]
    pub auth: AuthConfig,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Account credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Long-lived API access token, sent as a bearer credential.
    #[serde(default)]
    pub token: String,

    /// Account subdomain (the `{subdomain}` in `https://{subdomain}.amocrm.ru`).
    #[serde(default)]
    pub subdomain: String,

    /// Base domain the subdomain attaches to.
    #[serde(default = "default_base_domain")]
    pub base_domain: String,

    /// Full base-URL override. When set, subdomain/base_domain are ignored.
    /// Used for tests and mirror domains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Extra headers attached to every request (proxies, tracing ids).
    #[serde(default)]
    pub custom_headers: HashMap<String, String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_base_domain() -> String {
    constants::DEFAULT_BASE_DOMAIN.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AmoConfig {
    /// Build a configuration from a credential pair, with defaults elsewhere.
    pub fn new(token: impl Into<String>, subdomain: impl Into<String>) -> Self {
        Self {
            auth: AuthConfig {
                token: token.into(),
                subdomain: subdomain.into(),
                base_domain: default_base_domain(),
                base_url: None,
            },
            ..Default::default()
        }
    }

    /// Build a configuration from the environment.
    ///
    /// Reads `AMO_ACCESS_TOKEN` (required), `AMO_SUBDOMAIN` (required unless
    /// `AMO_BASE_URL` is set), and the optional `AMO_BASE_DOMAIN` /
    /// `AMO_BASE_URL` overrides.
    pub fn from_env() -> AmoResult<Self> {
        let token = std::env::var("AMO_ACCESS_TOKEN")
            .map_err(|_| AmoError::MissingConfig("AMO_ACCESS_TOKEN".into()))?;
        let base_url = std::env::var("AMO_BASE_URL").ok();
        let subdomain = match std::env::var("AMO_SUBDOMAIN") {
            Ok(s) => s,
            Err(_) if base_url.is_some() => String::new(),
            Err(_) => return Err(AmoError::MissingConfig("AMO_SUBDOMAIN".into())),
        };

        let mut config = Self::new(token, subdomain);
        if let Ok(domain) = std::env::var("AMO_BASE_DOMAIN") {
            config.auth.base_domain = domain;
        }
        config.auth.base_url = base_url;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> AmoResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as TOML, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> AmoResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents =
            toml::to_string_pretty(self).map_err(|e| AmoError::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Default on-disk location for the configuration file.
    pub fn default_path() -> AmoResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| AmoError::Config("cannot determine config directory".into()))?;
        Ok(base.join("amo").join("config.toml"))
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> AmoResult<()> {
        if self.auth.token.is_empty() {
            return Err(AmoError::MissingConfig("auth.token".into()));
        }
        if self.auth.subdomain.is_empty() && self.auth.base_url.is_none() {
            return Err(AmoError::MissingConfig("auth.subdomain".into()));
        }
        Ok(())
    }

    /// The account origin, e.g. `https://myteam.amocrm.ru`.
    pub fn base_url(&self) -> String {
        match &self.auth.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.{}", self.auth.subdomain, self.auth.base_domain),
        }
    }

    /// The API root, e.g. `https://myteam.amocrm.ru/api/v4`.
    pub fn api_root(&self) -> String {
        format!("{}/api/{}", self.base_url(), constants::API_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_from_subdomain() {
        let config = AmoConfig::new("secret", "myteam");
        assert_eq!(config.base_url(), "https://myteam.amocrm.ru");
        assert_eq!(config.api_root(), "https://myteam.amocrm.ru/api/v4");
    }

    #[test]
    fn test_base_url_override_wins() {
        let mut config = AmoConfig::new("secret", "myteam");
        config.auth.base_url = Some("http://127.0.0.1:8080/".into());
        assert_eq!(config.api_root(), "http://127.0.0.1:8080/api/v4");
    }

    #[test]
    fn test_validate_rejects_empty_token() {
        let config = AmoConfig::new("", "myteam");
        assert!(matches!(
            config.validate(),
            Err(AmoError::MissingConfig(field)) if field == "auth.token"
        ));
    }

    #[test]
    fn test_validate_rejects_empty_subdomain_without_override() {
        let config = AmoConfig::new("secret", "");
        assert!(config.validate().is_err());

        let mut config = AmoConfig::new("secret", "");
        config.auth.base_url = Some("http://127.0.0.1:8080".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AmoConfig::new("secret", "myteam");
        config
            .http
            .custom_headers
            .insert("X-Request-Source".into(), "cli".into());
        config.logging.level = "debug".into();
        config.save(&path).unwrap();

        let loaded = AmoConfig::load(&path).unwrap();
        assert_eq!(loaded.auth.token, "secret");
        assert_eq!(loaded.auth.subdomain, "myteam");
        assert_eq!(loaded.auth.base_domain, "amocrm.ru");
        assert_eq!(
            loaded.http.custom_headers.get("X-Request-Source").unwrap(),
            "cli"
        );
        assert_eq!(loaded.logging.level, "debug");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AmoConfig =
            toml::from_str("[auth]\ntoken = \"t\"\nsubdomain = \"s\"\n").unwrap();
        assert_eq!(config.auth.base_domain, "amocrm.ru");
        assert_eq!(config.logging.level, "info");
        assert!(config.http.custom_headers.is_empty());
    }
}
