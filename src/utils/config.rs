use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::{PromptOverride, Style};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variables searched for the API credential, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Image model name
    pub model: String,

    /// Base URL of the generative language API
    pub api_url: String,

    /// Style shown when the gallery opens
    pub initial_style: Style,

    /// Seconds each artwork stays on screen during an auto-tour
    pub auto_tour_interval_secs: u64,

    /// Overall timeout for a single generation request
    pub request_timeout_secs: u64,

    /// Per-style replacements for the built-in prompt text
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub prompts: HashMap<String, PromptOverride>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            initial_style: Style::Pattachitra,
            auto_tour_interval_secs: 10,
            request_timeout_secs: 120,
            prompts: HashMap::new(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".heritage")
            .join("config.yaml")
    }

    /// Load from `path` (or the default location), falling back to
    /// defaults when the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::get_config_path);
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// API credential from the environment. Never stored in the config file
    /// and never validated locally.
    pub fn api_key(&self) -> Option<String> {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty())
    }

    pub fn auto_tour_interval(&self) -> Duration {
        Duration::from_secs(self.auto_tour_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
