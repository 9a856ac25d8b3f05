use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// YouTube Data API key. Resolved once at startup; never read from the
    /// environment after that.
    pub api_key: Option<String>,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Playlist member page size, capped at the API maximum of 50.
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            user_agent: format!("yt-meta-ng/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            page_size: 50,
        }
    }
}

impl Config {
    /// Defaults, then the environment: `YOUTUBE_API_KEY` fills in the key
    /// when no config file or CLI flag provided one.
    pub fn load() -> Self {
        let mut config = Self::default();
        if let Ok(key) = std::env::var("YOUTUBE_API_KEY") {
            if !key.is_empty() {
                config.api_key = Some(key);
            }
        }
        config
    }

    /// Reads a TOML config file, then applies the environment fallback for
    /// the API key.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&raw)?;
        if config.api_key.is_none() {
            config.api_key = Self::load().api_key;
        }
        Ok(config)
    }
}
