//! # Configuration Module
//!
//! Runtime configuration for Encore: round count, detection timeout,
//! poll interval, history window, scoring profile, and the timeout
//! policy. Configuration is read from a JSON file in the
//! platform-standard config directory; a missing file means defaults,
//! and every field has a default so partial files work too.
//!
//! ## Config Location
//!
//! - Linux: `~/.config/encore/config.json`
//! - macOS: `~/Library/Application Support/encore/config.json`
//! - Windows: `%APPDATA%\encore\config.json`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::scoring::ProfileName;
use crate::session::TimeoutPolicy;

/// Runtime quiz settings. All fields default, so any subset may appear
/// in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Rounds per session
    pub rounds: u32,
    /// How long to wait for a new track before giving up, in seconds
    pub round_timeout_secs: u64,
    /// Seconds between playback polls
    pub poll_interval_secs: u64,
    /// How many recent track ids detection refuses to repeat
    pub history_window: usize,
    /// Which point-weight profile grades the guesses
    pub profile: ProfileName,
    /// What happens when a round's detection wait times out
    pub on_timeout: TimeoutPolicy,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            rounds: 3,
            round_timeout_secs: 120,
            poll_interval_secs: 2,
            history_window: 5,
            profile: ProfileName::Standard,
            on_timeout: TimeoutPolicy::Retry,
        }
    }
}

impl QuizConfig {
    /// Load configuration from the standard location, falling back to
    /// defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined,
    /// or if a config file exists but cannot be read or parsed. A
    /// malformed file is an error rather than a silent fallback, so
    /// typos don't quietly change quiz behavior.
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    /// Load configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load): a missing file is fine, an
    /// unreadable or malformed one is not.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }
}

/// Returns the platform-appropriate config file path, creating the
/// `encore` subdirectory if needed.
///
/// # Errors
///
/// Returns an error if the system config directory cannot be
/// determined or the subdirectory cannot be created.
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system config directory. Please ensure your platform supports standard config directories."
        )
    })?;

    let encore_dir = config_dir.join("encore");
    fs::create_dir_all(&encore_dir).with_context(|| {
        format!(
            "Failed to create Encore config directory at {}. Please check file permissions.",
            encore_dir.display()
        )
    })?;

    Ok(encore_dir.join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = QuizConfig::default();
        assert_eq!(config.rounds, 3);
        assert_eq!(config.round_timeout_secs, 120);
        assert_eq!(config.poll_interval_secs, 2);
        assert_eq!(config.history_window, 5);
        assert_eq!(config.profile, ProfileName::Standard);
        assert_eq!(config.on_timeout, TimeoutPolicy::Retry);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let config = QuizConfig::load_from(&dir.path().join("nope.json"))
            .expect("Missing file should fall back to defaults");
        assert_eq!(config.rounds, QuizConfig::default().rounds);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join("config.json");
        let mut file = fs::File::create(&path).expect("Should create config file");
        write!(file, r#"{{"rounds": 5, "profile": "broadcast"}}"#).expect("Should write config");

        let config = QuizConfig::load_from(&path).expect("Partial config should parse");
        assert_eq!(config.rounds, 5);
        assert_eq!(config.profile, ProfileName::Broadcast);
        assert_eq!(config.round_timeout_secs, 120, "unset fields keep defaults");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join("config.json");
        fs::write(&path, "{ this is not json").expect("Should write file");

        assert!(QuizConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = QuizConfig::default();
        config.on_timeout = TimeoutPolicy::Abort;
        config.profile = ProfileName::Broadcast;

        let json = serde_json::to_string(&config).expect("Should serialize");
        let back: QuizConfig = serde_json::from_str(&json).expect("Should deserialize");
        assert_eq!(back.on_timeout, TimeoutPolicy::Abort);
        assert_eq!(back.profile, ProfileName::Broadcast);
    }

    #[test]
    fn test_get_config_path_structure() {
        let path = get_config_path().expect("Should get valid path");
        assert!(path.is_absolute(), "Config path should be absolute");
        assert!(path.to_string_lossy().ends_with("config.json"));
        let parent = path.parent().expect("Should have parent directory");
        assert_eq!(parent.file_name().unwrap(), "encore");
    }
}
