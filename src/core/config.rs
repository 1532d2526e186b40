//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.pybuddy/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! The API key is not configured here; it lives in the credential store.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::state::DEFAULT_TOPIC;
use crate::inference::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BuddyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub topic: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub model: Option<String>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub topic: String,
    pub base_url: String,
    pub model: String,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub model: Option<String>,
    pub topic: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.pybuddy/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".pybuddy").join("config.toml"))
}

/// Load config from `~/.pybuddy/config.toml`.
pub fn load_config() -> Result<BuddyConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(BuddyConfig::default())
        }
    }
}

/// Load config from `path`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `BuddyConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<BuddyConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(BuddyConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: BuddyConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# PyBuddy Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.
# The API key is entered in the app and stored in ~/.pybuddy/api_key.

# [general]
# topic = "Python"                   # Or set PYBUDDY_TOPIC / --topic

# [api]
# base_url = "https://generativelanguage.googleapis.com"   # Or PYBUDDY_BASE_URL
# model = "gemini-pro"               # Or set PYBUDDY_MODEL / --model
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &BuddyConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |name| std::env::var(name).ok())
}

fn resolve_with_env(
    config: &BuddyConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Topic: CLI → env → config → default
    let topic = cli
        .topic
        .clone()
        .or_else(|| env("PYBUDDY_TOPIC"))
        .or_else(|| config.general.topic.clone())
        .unwrap_or_else(|| DEFAULT_TOPIC.to_string());

    // Model: CLI → env → config → default
    let model = cli
        .model
        .clone()
        .or_else(|| env("PYBUDDY_MODEL"))
        .or_else(|| config.api.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // Base URL: env → config → default
    let base_url = env("PYBUDDY_BASE_URL")
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    ResolvedConfig {
        topic,
        base_url,
        model,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&BuddyConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(
            resolved,
            ResolvedConfig {
                topic: "Python".to_string(),
                base_url: DEFAULT_BASE_URL.to_string(),
                model: DEFAULT_MODEL.to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = BuddyConfig {
            general: GeneralConfig {
                topic: Some("Rust".to_string()),
            },
            api: ApiConfig {
                base_url: Some("http://localhost:8080".to_string()),
                model: Some("gemini-1.5-flash".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.topic, "Rust");
        assert_eq!(resolved.base_url, "http://localhost:8080");
        assert_eq!(resolved.model, "gemini-1.5-flash");
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = BuddyConfig {
            api: ApiConfig {
                model: Some("from-config".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |name: &str| match name {
            "PYBUDDY_MODEL" => Some("from-env".to_string()),
            "PYBUDDY_TOPIC" => Some("SQL".to_string()),
            _ => None,
        };

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.model, "from-env");
        assert_eq!(resolved.topic, "SQL");

        let cli = CliOverrides {
            model: Some("from-cli".to_string()),
            topic: None,
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.model, "from-cli");
        assert_eq!(resolved.topic, "SQL");
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
topic = "JavaScript"

[api]
base_url = "http://127.0.0.1:9999"
model = "gemini-pro"
"#;
        let config: BuddyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.topic.as_deref(), Some("JavaScript"));
        assert_eq!(config.api.base_url.as_deref(), Some("http://127.0.0.1:9999"));
        assert_eq!(config.api.model.as_deref(), Some("gemini-pro"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[api]
model = "my-model"
"#;
        let config: BuddyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.model.as_deref(), Some("my-model"));
        assert!(config.api.base_url.is_none());
        assert!(config.general.topic.is_none());
    }

    #[test]
    fn test_generated_default_parses_as_empty() {
        let config: BuddyConfig = toml::from_str(DEFAULT_CONFIG_CONTENT).unwrap();
        assert!(config.general.topic.is_none());
        assert!(config.api.model.is_none());
    }

    #[test]
    fn test_load_missing_file_generates_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".pybuddy").join("config.toml");
        let config = load_config_from(&path).unwrap();
        assert!(config.general.topic.is_none());
        assert!(path.exists());
    }

    #[test]
    fn test_load_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\ntopic = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}
