use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding `base_url`
pub const BASE_URL_ENV: &str = "CAMPAIGN_TUI_BASE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Backend root, e.g. `http://localhost:8000`
    pub base_url: String,
    /// Per-request timeout; none means wait indefinitely
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Where generated audio clips are written
    #[serde(default)]
    pub audio_dir: Option<String>,
    /// Program used to open a saved clip
    #[serde(default = "default_audio_player")]
    pub audio_player: String,
}

fn default_audio_player() -> String {
    if cfg!(target_os = "macos") {
        "open".to_string()
    } else {
        "xdg-open".to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: None,
            audio_dir: None,
            audio_player: default_audio_player(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".campaign-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Load the saved config, writing defaults on first run, then apply
    /// environment overrides
    pub fn resolve() -> Config {
        let config = match Self::load() {
            Some(config) => config,
            None => {
                let config = Config::default();
                if let Err(e) = config.save() {
                    tracing::warn!(error = %e, "could not write default config");
                }
                config
            }
        };
        config.with_base_url_override(env::var(BASE_URL_ENV).ok())
    }

    /// Replace `base_url` when an override is set and non-empty
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Config {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Audio directory, defaulting to `audio/` under the config directory
    pub fn audio_dir(&self) -> PathBuf {
        match self.audio_dir {
            Some(ref dir) => PathBuf::from(dir),
            None => Self::config_dir()
                .map(|dir| dir.join("audio"))
                .unwrap_or_else(|| env::temp_dir().join("campaign-tui-audio")),
        }
    }
}
