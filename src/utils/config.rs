use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Longest counter animation or ring delay accepted from a config file (ms)
pub const MAX_ANIMATION_MS: u64 = 60_000;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Report file path or http(s) URL
    pub report: String,

    /// Locale tag used for the last-update timestamp (e.g. `zh-TW`)
    pub locale: Option<String>,

    /// Port for `serve`
    pub port: u16,

    /// Duration of the score counter animation (ms)
    pub counter_duration_ms: u64,

    /// Delay before the score ring transition starts (ms)
    pub ring_delay_ms: u64,

    /// Interval between animation frames (ms)
    pub frame_interval_ms: u64,

    /// Timeout for fetching a report over HTTP (ms). No timeout when unset.
    pub request_timeout_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report: "test-result.json".to_string(),
            locale: None,
            port: 9333,
            counter_duration_ms: 1500,
            ring_delay_ms: 100,
            frame_interval_ms: 16,
            request_timeout_ms: None,
        }
    }
}

impl Config {
    /// Load from `path`, or from the user config file when it exists,
    /// or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject animation timings the page cannot play back sensibly
    pub fn validate(&self) -> Result<()> {
        if self.frame_interval_ms == 0 {
            bail!("frameIntervalMs must be at least 1");
        }
        if self.counter_duration_ms > MAX_ANIMATION_MS {
            bail!(
                "counterDurationMs must be at most {} (got {})",
                MAX_ANIMATION_MS,
                self.counter_duration_ms
            );
        }
        if self.ring_delay_ms > MAX_ANIMATION_MS {
            bail!(
                "ringDelayMs must be at most {} (got {})",
                MAX_ANIMATION_MS,
                self.ring_delay_ms
            );
        }
        Ok(())
    }

    /// Configured locale, else the environment's, else `en-US`
    pub fn resolved_locale(&self) -> String {
        self.locale
            .clone()
            .or_else(|| ["LC_ALL", "LC_TIME", "LANG"].iter().find_map(|key| {
                std::env::var(key).ok().and_then(|v| normalize_locale(&v))
            }))
            .unwrap_or_else(|| "en-US".to_string())
    }

    pub fn counter_duration(&self) -> Duration {
        Duration::from_millis(self.counter_duration_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

/// `~/.config/health-dash/config.yaml` (platform equivalent)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("health-dash").join("config.yaml"))
}

/// `zh_TW.UTF-8` -> `zh-TW`. `C` and `POSIX` carry no locale.
fn normalize_locale(raw: &str) -> Option<String> {
    let tag = raw.split(['.', '@']).next().unwrap_or("").trim();
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }
    Some(tag.replace('_', "-"))
}
