// SPDX-License-Identifier: MPL-2.0
//! Decoder property newtypes.
//!
//! This module provides type-safe wrappers for values sent to the decoder,
//! ensuring they are always within the ranges the decoder accepts.

use serde::{Deserialize, Serialize};

// =============================================================================
// PlaybackSpeed
// =============================================================================

/// Playback speed bounds (0.5x to 2.0x), the range the native decoder accepts.
pub mod speed_bounds {
    /// Minimum playback speed.
    pub const MIN: f64 = 0.5;
    /// Maximum playback speed.
    pub const MAX: f64 = 2.0;
    /// Default playback speed (1.0 = normal speed).
    pub const DEFAULT: f64 = 1.0;
}

/// Playback speed value, guaranteed to be within valid range (0.5x - 2.0x).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct PlaybackSpeed(f64);

impl PlaybackSpeed {
    /// Creates a new playback speed, clamping to valid range.
    #[must_use]
    pub fn new(speed: f64) -> Self {
        if speed.is_nan() {
            return Self::default();
        }
        Self(speed.clamp(speed_bounds::MIN, speed_bounds::MAX))
    }

    /// Returns the speed value as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self(speed_bounds::DEFAULT)
    }
}

impl From<f64> for PlaybackSpeed {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<PlaybackSpeed> for f64 {
    fn from(speed: PlaybackSpeed) -> Self {
        speed.0
    }
}

// =============================================================================
// ScaleMode
// =============================================================================

/// How the decoder fits the video into the player surface.
///
/// Serialized as the decoder's numeric mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ScaleMode {
    /// Letterbox, whole frame visible.
    #[default]
    AspectFit,
    /// Crop to cover the surface.
    AspectFill,
    /// Stretch to the surface, ignoring aspect ratio.
    Fill,
}

impl ScaleMode {
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::AspectFit => 0,
            Self::AspectFill => 1,
            Self::Fill => 2,
        }
    }
}

impl TryFrom<u8> for ScaleMode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::AspectFit),
            1 => Ok(Self::AspectFill),
            2 => Ok(Self::Fill),
            other => Err(format!("unknown scale mode {other}")),
        }
    }
}

impl From<ScaleMode> for u8 {
    fn from(mode: ScaleMode) -> Self {
        mode.code()
    }
}

// =============================================================================
// QualityOption
// =============================================================================

/// One rendition offered for quality switching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityOption {
    /// Label shown to the user (e.g. "HD").
    pub label: String,
    /// Source identifier of the rendition.
    pub value: String,
}

impl QualityOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_clamps_to_valid_range() {
        assert_eq!(PlaybackSpeed::new(0.1).value(), speed_bounds::MIN);
        assert_eq!(PlaybackSpeed::new(8.0).value(), speed_bounds::MAX);
        assert_eq!(PlaybackSpeed::new(1.25).value(), 1.25);
        assert_eq!(PlaybackSpeed::new(f64::NAN), PlaybackSpeed::default());
    }

    #[test]
    fn speed_deserializes_with_clamp() {
        let speed: PlaybackSpeed = serde_json::from_str("4.0").unwrap();
        assert_eq!(speed.value(), speed_bounds::MAX);
    }

    #[test]
    fn scale_mode_uses_decoder_codes() {
        assert_eq!(ScaleMode::default().code(), 0);
        assert_eq!(ScaleMode::try_from(2u8), Ok(ScaleMode::Fill));
        assert!(ScaleMode::try_from(9u8).is_err());
        assert_eq!(serde_json::to_string(&ScaleMode::AspectFill).unwrap(), "1");
    }
}
