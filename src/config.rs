use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{GlanceError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub vision: VisionConfig,
}

// -- Vision CLI ----------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct VisionConfig {
    /// Path to the host CLI binary used for vision calls (default: "crush").
    /// Can be overridden with the `GLANCE_VISION_BIN` env var.
    #[serde(default = "default_cli_bin")]
    pub cli_bin: String,

    /// Provider passed to the host CLI (default: "zai").
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Vision-capable model identifier (default: "glm-4.6v").
    /// Can be overridden with the `GLANCE_VISION_MODEL` env var.
    #[serde(default = "default_model")]
    pub model: String,

    /// Subprocess timeout in seconds (0 = no timeout).
    #[serde(default)]
    pub timeout_secs: u64,
}

// -- Defaults ------------------------------------------------------------

fn default_cli_bin() -> String {
    "crush".to_string()
}
fn default_provider() -> String {
    "zai".to_string()
}
fn default_model() -> String {
    "glm-4.6v".to_string()
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            cli_bin: default_cli_bin(),
            provider: default_provider(),
            model: default_model(),
            timeout_secs: 0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vision: VisionConfig::default(),
        }
    }
}

// -- Config impl ---------------------------------------------------------

impl Config {
    /// Load config from the given path, or the default XDG config location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path(),
        };

        let config = if config_path.exists() {
            info!("loading config from {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path).map_err(GlanceError::Io)?;
            toml::from_str(&contents)
                .map_err(|e| GlanceError::Config(format!("parse error: {e}")))?
        } else {
            info!("no config file found, using defaults");
            Config::default()
        };

        Ok(config)
    }

    /// Returns the default config file path: `$XDG_CONFIG_HOME/glance/config.toml`
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("glance")
            .join("config.toml")
    }

    /// Generate the default config file contents.
    pub fn default_config_contents() -> &'static str {
        include_str!("../config.example.toml")
    }
}
