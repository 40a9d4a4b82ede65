// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for player options.
//!
//! # Categories
//!
//! - **Player**: caller-facing options
//! - **Presentation**: fullscreen layout
//! - **Config file**: where options are persisted

// ==========================================================================
// Player Defaults
// ==========================================================================

/// Default accent color for the control overlay.
pub const DEFAULT_THEME_COLOR: &str = "#F85959";

/// Whether playback starts as soon as a source is prepared.
pub const DEFAULT_AUTO_PLAY: bool = false;

/// Whether the caller may switch the player to fullscreen.
pub const DEFAULT_ENABLE_FULL_SCREEN: bool = true;

/// Whether the decoder uses hardware decoding.
pub const DEFAULT_HARDWARE_DECODER: bool = false;

// ==========================================================================
// Presentation Defaults
// ==========================================================================

/// Stacking layer of the fullscreen rectangle.
pub const FULLSCREEN_LAYER: u32 = 100;

// ==========================================================================
// Config File
// ==========================================================================

/// Name of the options file inside the application config directory.
pub const CONFIG_FILE: &str = "player.toml";

/// Application directory name under the platform config directory.
pub const APP_NAME: &str = "PlaybackSession";

const _: () = {
    assert!(FULLSCREEN_LAYER > 0);
    assert!(!DEFAULT_THEME_COLOR.is_empty());
};
