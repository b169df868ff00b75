//! Sentinelle configuration management

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main Sentinelle configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentinelleConfig {
    /// Hosted entity-service backend configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// Professional-center configuration
    #[serde(default)]
    pub center: CenterConfig,
}

impl SentinelleConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Default configuration file path (~/.sentinelle/config.toml)
    pub fn default_path() -> PathBuf {
        dirs_next::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sentinelle")
            .join("config.toml")
    }
}

/// Entity-service backend configuration
///
/// The backend is a hosted data/auth service; Sentinelle only ever talks to
/// it over its REST entity API with a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the entity API
    pub base_url: String,

    /// Environment variable the API token is read from
    pub api_token_env: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.sentinelle.app/v1".to_string(),
            api_token_env: "SENTINELLE_API_TOKEN".to_string(),
            timeout_secs: 30,
        }
    }
}

impl BackendConfig {
    /// Resolve the API token from the configured environment variable.
    ///
    /// Tries the exact name first, then the UPPER_CASE form.
    pub fn resolve_token(&self) -> Option<String> {
        std::env::var(&self.api_token_env)
            .or_else(|_| std::env::var(self.api_token_env.to_uppercase()))
            .ok()
    }
}

/// Professional-center configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CenterConfig {
    /// Maximum briefs fetched per load
    pub brief_limit: usize,

    /// Maximum items fetched per related collection (predictions, signals, trends)
    pub related_limit: usize,

    /// Domain opened when none is given on the command line
    pub default_domain: String,
}

impl Default for CenterConfig {
    fn default() -> Self {
        Self {
            brief_limit: 100,
            related_limit: 5,
            default_domain: "Militaire".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SentinelleConfig::default();
        assert_eq!(config.center.related_limit, 5);
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.center.default_domain, "Militaire");
    }

    #[test]
    fn test_load_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = SentinelleConfig::default();
        config.backend.base_url = "http://localhost:9000".to_string();
        config.center.brief_limit = 25;
        std::fs::write(&path, toml::to_string(&config).unwrap()).unwrap();

        let loaded = SentinelleConfig::load(&path).unwrap();
        assert_eq!(loaded.backend.base_url, "http://localhost:9000");
        assert_eq!(loaded.center.brief_limit, 25);
        // Untouched section keeps its defaults
        assert_eq!(loaded.center.related_limit, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let result = SentinelleConfig::load(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[backend]\nbase_url = \"http://x\"\napi_token_env = \"T\"\ntimeout_secs = 5\n").unwrap();

        let loaded = SentinelleConfig::load(&path).unwrap();
        assert_eq!(loaded.backend.timeout_secs, 5);
        assert_eq!(loaded.center.brief_limit, 100);
    }
}
