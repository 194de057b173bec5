use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("SENTIMOJI_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = std::env::var("SENTIMOJI_PORT") {
            if let Ok(n) = v.parse() {
                self.server.port = n;
            }
        }
        if let Ok(v) = std::env::var("SENTIMOJI_DB") {
            self.storage.db_path = v;
        }
        if let Ok(v) = std::env::var("SENTIMOJI_HISTORY_LIMIT") {
            if let Ok(n) = v.parse() {
                self.storage.history_limit = n;
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8090,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
    /// Default number of history entries returned when a request gives no limit.
    pub history_limit: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: "sentimoji.db".to_string(),
            history_limit: 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// One emoji per this many words of a sentence (floor division, min 1).
    pub emoji_per_words: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { emoji_per_words: 5 }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8090);
        assert_eq!(cfg.storage.db_path, "sentimoji.db");
        assert_eq!(cfg.storage.history_limit, 20);
        assert_eq!(cfg.engine.emoji_per_words, 5);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[server]
port = 9000
"#;
        let cfg: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.server.port, 9000);
        // Defaults for unspecified fields
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.storage.history_limit, 20);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[server]
host = "0.0.0.0"
port = 8080

[storage]
db_path = "data/suggestions.db"
history_limit = 50

[engine]
emoji_per_words = 3
"#;
        let cfg: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.storage.db_path, "data/suggestions.db");
        assert_eq!(cfg.storage.history_limit, 50);
        assert_eq!(cfg.engine.emoji_per_words, 3);
    }

    #[test]
    fn test_env_overrides_and_defaults() {
        std::env::set_var("SENTIMOJI_PORT", "7777");
        std::env::set_var("SENTIMOJI_DB", "override.db");

        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides();

        assert_eq!(cfg.server.port, 7777);
        assert_eq!(cfg.storage.db_path, "override.db");

        std::env::remove_var("SENTIMOJI_PORT");
        std::env::remove_var("SENTIMOJI_DB");

        // Nonexistent path returns defaults (no env interference)
        let cfg = AppConfig::load_or_default("/nonexistent/sentimoji.toml");
        assert_eq!(cfg.server.port, 8090);
    }
}
