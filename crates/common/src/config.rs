//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BallbotError, BallbotResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default tracking-loop settings.
    pub tracking: TrackingDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default parameters for the observation loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingDefaults {
    /// Observation ticks per second.
    pub sample_rate_hz: u32,

    /// Expected time spent locating the object each tick, subtracted from
    /// the pause between ticks.
    pub frame_calculation_ms: u64,

    /// Screen area watched for the tracked object.
    pub region: RegionConfig,
}

/// A screen rectangle in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "ballbot_kinematics=trace,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path. Logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

impl Default for TrackingDefaults {
    fn default() -> Self {
        Self {
            sample_rate_hz: 20,
            frame_calculation_ms: 40,
            region: RegionConfig::default(),
        }
    }
}

impl Default for RegionConfig {
    /// The emulated phone screen the bot was first built against.
    fn default() -> Self {
        Self {
            left: 70,
            top: 52,
            width: 772,
            height: 1028,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl TrackingDefaults {
    /// Pause between ticks: one sample period minus the expected
    /// calculation time, never negative.
    pub fn tick_pause(&self) -> std::time::Duration {
        let period_ms = 1000 / u64::from(self.sample_rate_hz.max(1));
        std::time::Duration::from_millis(period_ms.saturating_sub(self.frame_calculation_ms))
    }

    /// Reject settings the tracking loop cannot run with.
    pub fn validate(&self) -> BallbotResult<()> {
        if self.sample_rate_hz == 0 {
            return Err(BallbotError::config("sample_rate_hz must be positive"));
        }
        if self.region.width == 0 || self.region.height == 0 {
            return Err(BallbotError::config(format!(
                "capture region must have a non-zero size, got {}x{}",
                self.region.width, self.region.height
            )));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                Self::default()
            }
        }
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> BallbotResult<Self> {
        if !path.exists() {
            return Err(BallbotError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.tracking.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> BallbotResult<()> {
        self.save_to(&config_file_path())
    }

    /// Save config as pretty JSON to an explicit path.
    pub fn save_to(&self, path: &Path) -> BallbotResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("ballbot").join("config.json")
}
