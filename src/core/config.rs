//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.parley/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::core::state::Theme;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub endpoint_url: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub theme: Option<Theme>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:8000/chat";
pub const DEFAULT_SESSION_ID: &str = "local-llama-session";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub endpoint_url: String,
    pub session_id: String,
    pub theme: Theme,
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

/// Returns the path to `~/.parley/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".parley").join("config.toml"))
}

/// Load config from `~/.parley/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ParleyConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ParleyConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ParleyConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ParleyConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: ParleyConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Parley Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# endpoint_url = "http://localhost:8000/chat"   # Or set PARLEY_ENDPOINT_URL
# session_id = "local-llama-session"            # Or set PARLEY_SESSION_ID

# [ui]
# theme = "dark"                                # "light" or "dark"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// The `cli_*` arguments come from CLI flags (None = not specified).
pub fn resolve(
    config: &ParleyConfig,
    cli_endpoint_url: Option<&str>,
    cli_session_id: Option<&str>,
    cli_theme: Option<Theme>,
) -> ResolvedConfig {
    // Endpoint URL: CLI → env → config → default
    let endpoint_url = cli_endpoint_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("PARLEY_ENDPOINT_URL").ok())
        .or_else(|| config.server.endpoint_url.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT_URL.to_string());

    // Session id: CLI → env → config → default
    let session_id = cli_session_id
        .map(|s| s.to_string())
        .or_else(|| std::env::var("PARLEY_SESSION_ID").ok())
        .or_else(|| config.server.session_id.clone())
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    // Theme: CLI → env → config → default
    let theme = cli_theme
        .or_else(|| {
            std::env::var("PARLEY_THEME")
                .ok()
                .and_then(|s| Theme::from_str(&s, true).ok())
        })
        .or(config.ui.theme)
        .unwrap_or_default();

    ResolvedConfig {
        endpoint_url,
        session_id,
        theme,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = ParleyConfig::default();
        assert!(config.server.endpoint_url.is_none());
        assert!(config.server.session_id.is_none());
        assert!(config.ui.theme.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = ParleyConfig::default();
        let resolved = resolve(&config, None, None, None);
        assert_eq!(resolved.endpoint_url, DEFAULT_ENDPOINT_URL);
        assert_eq!(resolved.session_id, DEFAULT_SESSION_ID);
        assert_eq!(resolved.theme, Theme::Dark);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ParleyConfig {
            server: ServerConfig {
                endpoint_url: Some("http://10.0.0.5:9000/chat".to_string()),
                session_id: Some("desk-session".to_string()),
            },
            ui: UiConfig {
                theme: Some(Theme::Light),
            },
        };
        let resolved = resolve(&config, None, None, None);
        assert_eq!(resolved.endpoint_url, "http://10.0.0.5:9000/chat");
        assert_eq!(resolved.session_id, "desk-session");
        assert_eq!(resolved.theme, Theme::Light);
    }

    #[test]
    fn test_resolve_cli_flags_win() {
        let config = ParleyConfig {
            server: ServerConfig {
                endpoint_url: Some("http://from-file/chat".to_string()),
                session_id: Some("file-session".to_string()),
            },
            ui: UiConfig {
                theme: Some(Theme::Light),
            },
        };
        let resolved = resolve(
            &config,
            Some("http://from-cli/chat"),
            Some("cli-session"),
            Some(Theme::Dark),
        );
        assert_eq!(resolved.endpoint_url, "http://from-cli/chat");
        assert_eq!(resolved.session_id, "cli-session");
        assert_eq!(resolved.theme, Theme::Dark);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[server]
endpoint_url = "http://192.168.1.20:8000/chat"
session_id = "lan-session"

[ui]
theme = "light"
"#;
        let config: ParleyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.server.endpoint_url.as_deref(),
            Some("http://192.168.1.20:8000/chat")
        );
        assert_eq!(config.server.session_id.as_deref(), Some("lan-session"));
        assert_eq!(config.ui.theme, Some(Theme::Light));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[server]
session_id = "just-a-session"
"#;
        let config: ParleyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.session_id.as_deref(), Some("just-a-session"));
        assert!(config.server.endpoint_url.is_none());
        assert!(config.ui.theme.is_none());

        let resolved = resolve(&config, None, None, None);
        assert_eq!(resolved.endpoint_url, DEFAULT_ENDPOINT_URL);
        assert_eq!(resolved.session_id, "just-a-session");
    }
}
