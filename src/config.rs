//! Configuration handling for the wizard and the relay server

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DOCUMENT_ROOT: &str = "docs";

/// User configuration; every field is optional and falls back to an
/// environment variable, then a default
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Base URL of the submission endpoint
    pub endpoint: Option<String>,
    /// Port the relay server listens on
    pub port: Option<u16>,
    /// Document root for static assets
    pub document_root: Option<String>,
    /// Selects the production mail recipient
    pub production: Option<bool>,
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "seventeen15", "collective-apply")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: AppConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Submission endpoint base URL
    pub fn endpoint(&self) -> String {
        std::env::var("COLLECTIVE_APPLY_ENDPOINT")
            .ok()
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    /// Server listen port
    pub fn port(&self) -> u16 {
        std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .or(self.port)
            .unwrap_or(DEFAULT_PORT)
    }

    /// Static asset document root
    pub fn document_root(&self) -> PathBuf {
        std::env::var("DOCUMENT_ROOT")
            .ok()
            .or_else(|| self.document_root.clone())
            .unwrap_or_else(|| DEFAULT_DOCUMENT_ROOT.to_string())
            .into()
    }

    /// Whether this deployment should mail the production recipient
    pub fn production(&self) -> bool {
        match std::env::var("APP_ENV") {
            Ok(env) => env == "production",
            Err(_) => self.production.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.endpoint.is_none());
        assert!(config.port.is_none());
        assert!(config.document_root.is_none());
        assert!(config.production.is_none());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = AppConfig {
            endpoint: Some("http://localhost:4000".to_string()),
            port: Some(4000),
            document_root: Some("public".to_string()),
            production: Some(true),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.endpoint, Some("http://localhost:4000".to_string()));
        assert_eq!(parsed.port, Some(4000));
        assert_eq!(parsed.document_root, Some("public".to_string()));
        assert_eq!(parsed.production, Some(true));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: AppConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.endpoint.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"endpoint": "http://x", "unknown_field": "value"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.endpoint, Some("http://x".to_string()));
    }

    #[test]
    fn test_config_file_values_used_as_fallback() {
        let config = AppConfig {
            endpoint: Some("http://configured:9000".to_string()),
            port: Some(9000),
            document_root: Some("static".to_string()),
            production: None,
        };
        // Env overrides are absent in the test environment for these names
        if std::env::var("COLLECTIVE_APPLY_ENDPOINT").is_err() {
            assert_eq!(config.endpoint(), "http://configured:9000");
        }
        if std::env::var("PORT").is_err() {
            assert_eq!(config.port(), 9000);
        }
        if std::env::var("DOCUMENT_ROOT").is_err() {
            assert_eq!(config.document_root(), PathBuf::from("static"));
        }
    }

    #[test]
    fn test_defaults_when_nothing_configured() {
        let config = AppConfig::default();
        if std::env::var("COLLECTIVE_APPLY_ENDPOINT").is_err() {
            assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        }
        if std::env::var("APP_ENV").is_err() {
            assert!(!config.production());
        }
    }

    #[test]
    fn test_load_returns_default_when_no_file() {
        let result = AppConfig::load();
        assert!(result.is_ok());
    }
}
