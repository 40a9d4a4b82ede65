// SPDX-License-Identifier: MPL-2.0
//! This module handles the player options, including loading and saving
//! them to a `player.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use playback_session::config::{self, PlayerOptions};
//! use std::path::PathBuf;
//!
//! // Load existing options
//! let mut options = config::load().unwrap_or_default();
//!
//! // Modify an option
//! options.auto_play = true;
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("player.toml");
//! config::save_to_path(&options, &temp_file).expect("Failed to save to path");
//! let loaded = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert!(loaded.auto_play);
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

use crate::domain::{PlaybackSpeed, QualityOption, ScaleMode};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::{
    APP_NAME, CONFIG_FILE, DEFAULT_AUTO_PLAY, DEFAULT_ENABLE_FULL_SCREEN, DEFAULT_THEME_COLOR,
    FULLSCREEN_LAYER,
};

/// Options recognized from the external caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerOptions {
    /// Initial source. `None` leaves the session idle.
    pub source: Option<String>,
    pub enable_full_screen: bool,
    /// Forwarded to the decoder with every load.
    pub auto_play: bool,
    /// Presentation only.
    pub theme_color: String,
    /// Renditions offered for quality switching.
    pub quality_list: Vec<QualityOption>,
    pub decoder: DecoderProperties,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            source: None,
            quality_list: Vec::new(),
            enable_full_screen: DEFAULT_ENABLE_FULL_SCREEN,
            auto_play: DEFAULT_AUTO_PLAY,
            theme_color: DEFAULT_THEME_COLOR.to_string(),
            decoder: DecoderProperties::default(),
        }
    }
}

impl PlayerOptions {
    /// Returns options with `source` set, everything else default.
    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }

    /// Finds the quality entry whose value is `source`.
    #[must_use]
    pub fn quality_for(&self, source: &str) -> Option<&QualityOption> {
        self.quality_list.iter().find(|q| q.value == source)
    }
}

/// Properties pushed to the decoder with `SetProperty`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderProperties {
    pub enable_hardware_decoder: bool,
    pub speed: PlaybackSpeed,
    pub scale_mode: ScaleMode,
    pub muted: bool,
    pub loop_playback: bool,
}

impl Default for DecoderProperties {
    fn default() -> Self {
        Self {
            enable_hardware_decoder: defaults::DEFAULT_HARDWARE_DECODER,
            speed: PlaybackSpeed::default(),
            scale_mode: ScaleMode::default(),
            muted: false,
            loop_playback: false,
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<PlayerOptions> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(PlayerOptions::default())
}

pub fn save(options: &PlayerOptions) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(options, &path);
    }
    Ok(())
}

/// Reads options from `path`. Unparseable content yields the defaults.
pub fn load_from_path(path: &Path) -> Result<PlayerOptions> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(options) => Ok(options),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid player options, using defaults");
            Ok(PlayerOptions::default())
        }
    }
}

pub fn save_to_path(options: &PlayerOptions, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(options)?;
    fs::write(path, content)?;
    Ok(())
}
