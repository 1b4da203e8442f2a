//! TOML-based application configuration.
//!
//! Stores user preferences that are settings rather than data:
//! - Daily step goal
//! - Hydration reminder defaults
//! - Notification toggle
//!
//! Configuration is stored at `~/.config/wellnesshub/config.toml`. A missing
//! file loads as defaults; unknown or missing fields fall back per-field.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

use super::data_dir;

/// Step tracking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepsConfig {
    #[serde(default = "default_step_goal")]
    pub daily_goal: u32,
}

impl Default for StepsConfig {
    fn default() -> Self {
        Self { daily_goal: default_step_goal() }
    }
}

/// Hydration reminder defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HydrationConfig {
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u32,
    #[serde(default = "default_start_time")]
    pub start: String,
    #[serde(default = "default_end_time")]
    pub end: String,
    #[serde(default = "default_message")]
    pub message: String,
    #[serde(default = "default_water_goal_glasses")]
    pub daily_goal_glasses: u32,
}

impl Default for HydrationConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
            start: default_start_time(),
            end: default_end_time(),
            message: default_message(),
            daily_goal_glasses: default_water_goal_glasses(),
        }
    }
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/wellnesshub/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub steps: StepsConfig,
    #[serde(default)]
    pub hydration: HydrationConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()
            .map_err(|e| ConfigError::LoadFailed {
                path: PathBuf::from("~/.config/wellnesshub"),
                message: e.to_string(),
            })?
            .join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file is
    /// missing.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::LoadFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Save the configuration as pretty TOML.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Validate user-settable values.
    ///
    /// # Errors
    /// Returns an error for a zero step goal or a zero reminder interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps.daily_goal == 0 {
            return Err(ConfigError::InvalidValue {
                key: "steps.daily_goal".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.hydration.interval_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "hydration.interval_minutes".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn default_step_goal() -> u32 {
    8000
}

fn default_interval_minutes() -> u32 {
    60
}

fn default_start_time() -> String {
    "08:00".to_string()
}

fn default_end_time() -> String {
    "22:00".to_string()
}

fn default_message() -> String {
    "Time to hydrate! 💧".to_string()
}

fn default_water_goal_glasses() -> u32 {
    8
}

fn default_true() -> bool {
    true
}
