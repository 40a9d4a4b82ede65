// SPDX-License-Identifier: MPL-2.0
//! Playback state machine states.
//!
//! This module defines the states a playback session can be in, and where the
//! current state came from.

use serde::{Deserialize, Serialize};

/// Represents the current playback state of a session.
///
/// Exactly one of these holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// No source has been supplied yet.
    #[default]
    Idle,
    /// A source is being prepared, nothing has been rendered for it.
    Loading,
    /// Frames are being rendered.
    Playing,
    /// Playback paused at the current position.
    Paused,
    /// Playback stalled after the first frame, waiting for data.
    Buffering,
    /// The decoder reached the end of the media.
    Completed,
    /// The decoder reported an error for the current attempt.
    Errored,
}

/// Where the current [`PlaybackState`] came from.
///
/// Commands set the state they expect the decoder to reach (`Predicted`);
/// the next decoder event replaces it with what actually happened (`Confirmed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateOrigin {
    /// Set by a command, not yet acknowledged by the decoder.
    Predicted,
    /// Reported by the decoder.
    #[default]
    Confirmed,
}
