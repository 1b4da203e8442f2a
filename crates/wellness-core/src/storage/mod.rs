mod config;
pub mod preferences;

pub use config::{Config, HydrationConfig, NotificationsConfig, StepsConfig};
pub use preferences::Preferences;

use std::path::PathBuf;

use crate::error::CoreError;

/// Returns `~/.config/wellnesshub[-dev]/` based on WELLNESSHUB_ENV.
///
/// Set WELLNESSHUB_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("WELLNESSHUB_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("wellnesshub-dev")
    } else {
        base_dir.join("wellnesshub")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
