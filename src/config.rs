use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::env;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub provider: ProviderConfig,

    pub assistant: AssistantConfig,

    pub security: SecurityConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/court_data.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,

    /// Whether to set the Secure flag on session cookies.
    /// Leave off for local development over plain HTTP.
    pub secure_cookies: bool,

    pub session_idle_minutes: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_allowed_origins: vec![
                "http://localhost:5000".to_string(),
                "http://127.0.0.1:5000".to_string(),
            ],
            secure_cookies: false,
            session_idle_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Artificial delay applied to every mock lookup, modelling the registry round trip.
    pub simulated_latency_ms: u64,

    /// Offset from UTC used when rendering `fetched_on` (default: +05:30).
    pub display_utc_offset_minutes: i32,

    /// Zone label appended to `fetched_on`.
    pub display_zone_label: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: 1500,
            display_utc_offset_minutes: 330,
            display_zone_label: "IST".to_string(),
        }
    }
}

impl ProviderConfig {
    /// `None` when the configured offset is not a valid UTC offset.
    #[must_use]
    pub fn display_offset(&self) -> Option<chrono::FixedOffset> {
        self.display_utc_offset_minutes
            .checked_mul(60)
            .and_then(chrono::FixedOffset::east_opt)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Bearer credential for the completion service. Usually supplied via `OPENAI_API_KEY`.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    pub base_url: String,

    pub model: String,

    pub max_tokens: u32,

    pub temperature: f32,

    pub timeout_seconds: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 150,
            temperature: 0.7,
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Secret used to sign session cookies. Usually supplied via `SECRET_KEY`.
    #[serde(skip_serializing)]
    pub secret_key: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            secret_key: DEV_SECRET_KEY.to_string(),
        }
    }
}

pub const DEV_SECRET_KEY: &str = "dev-secret-key";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            json_logs: false,
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies environment overrides.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_file()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Environment wins over the file. Blank values are treated as unset.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup(env::OPENAI_API_KEY) {
            self.assistant.api_key = Some(key);
        }

        if let Some(secret) = lookup(env::SECRET_KEY) {
            self.security.secret_key = secret;
        }

        if let Some(url) = lookup(env::DATABASE_URL) {
            self.general.database_path = url;
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("courtdesk").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".courtdesk").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        if self.assistant.model.trim().is_empty() {
            anyhow::bail!("Assistant model cannot be empty");
        }

        if self.assistant.timeout_seconds == 0 {
            anyhow::bail!("Assistant timeout must be > 0 seconds");
        }

        if !(0.0..=2.0).contains(&self.assistant.temperature) {
            anyhow::bail!(
                "Assistant temperature must be between 0 and 2, got {}",
                self.assistant.temperature
            );
        }

        url::Url::parse(&self.assistant.base_url).with_context(|| {
            format!("Invalid assistant base URL: {}", self.assistant.base_url)
        })?;

        if self.provider.display_offset().is_none() {
            anyhow::bail!(
                "Display offset out of range: {} minutes",
                self.provider.display_utc_offset_minutes
            );
        }

        if self.security.secret_key == DEV_SECRET_KEY {
            warn!("SECRET_KEY not set, using the development fallback");
        }

        Ok(())
    }

    #[must_use]
    pub fn assistant_configured(&self) -> bool {
        self.assistant.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.assistant.model, "gpt-3.5-turbo");
        assert_eq!(config.assistant.max_tokens, 150);
        assert_eq!(config.assistant.timeout_seconds, 10);
        assert_eq!(config.provider.simulated_latency_ms, 1500);
        assert_eq!(config.security.secret_key, DEV_SECRET_KEY);
        assert!(!config.assistant_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization_hides_secrets() {
        let mut config = Config::default();
        config.assistant.api_key = Some("sk-live".to_string());
        config.security.secret_key = "very-secret".to_string();

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[assistant]"));
        assert!(!toml_str.contains("sk-live"));
        assert!(!toml_str.contains("very-secret"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [provider]
            simulated_latency_ms = 0
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.provider.simulated_latency_ms, 0);

        assert_eq!(config.assistant.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("OPENAI_API_KEY", "sk-test"),
            ("SECRET_KEY", "s3cr3t"),
            ("DATABASE_URL", "   "),
        ]);

        let mut config = Config::default();
        config.apply_env_overrides(|key| vars.get(key).map(ToString::to_string));

        assert_eq!(config.assistant.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.security.secret_key, "s3cr3t");
        assert_eq!(config.general.database_path, "sqlite:data/court_data.db");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.assistant.temperature = 3.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.assistant.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.assistant.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_display_offset_bounds() {
        let mut provider = ProviderConfig::default();
        assert_eq!(
            provider.display_offset().map(|o| o.local_minus_utc()),
            Some(330 * 60)
        );

        provider.display_utc_offset_minutes = 24 * 60;
        assert!(provider.display_offset().is_none());

        provider.display_utc_offset_minutes = i32::MAX;
        assert!(provider.display_offset().is_none());

        let mut config = Config::default();
        config.provider.display_utc_offset_minutes = i32::MIN;
        assert!(config.validate().is_err());
    }
}
