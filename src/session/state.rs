// SPDX-License-Identifier: MPL-2.0
//! The session aggregate and its read-only snapshot.

use super::decoder::LoadingMetrics;
use crate::domain::{PlaybackState, StateOrigin};
use crate::error::DecoderError;
use serde::Serialize;

/// All mutable playback state of one player.
///
/// Only the coordinator mutates it; everyone else sees a [`SessionSnapshot`].
/// The session is replaced in place when the source changes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub(crate) source: Option<String>,
    pub(crate) playback_state: PlaybackState,
    pub(crate) state_origin: StateOrigin,
    pub(crate) position_ms: u64,
    pub(crate) duration_ms: u64,
    /// Set by `Prepared` for the current source.
    pub(crate) prepared: bool,
    pub(crate) is_fullscreen: bool,
    pub(crate) is_session_started: bool,
    pub(crate) pending_seek_target_ms: Option<u64>,
    pub(crate) loading_progress: LoadingMetrics,
    pub(crate) last_error: Option<DecoderError>,
}

impl Session {
    /// Creates an idle session with no source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in a new source and starts a load cycle.
    ///
    /// With `preserve_position` the current position becomes the pending seek
    /// target for the new source; otherwise the position starts over.
    pub(crate) fn replace_source(&mut self, source: String, preserve_position: bool) {
        if preserve_position {
            self.pending_seek_target_ms = Some(self.position_ms);
        } else {
            self.position_ms = 0;
            self.pending_seek_target_ms = None;
            self.is_session_started = false;
        }
        self.source = Some(source);
        self.duration_ms = 0;
        self.prepared = false;
        self.last_error = None;
        self.loading_progress.clear();
        self.predict(PlaybackState::Loading);
    }

    /// Sets a state expected from an issued command.
    pub(crate) fn predict(&mut self, state: PlaybackState) {
        self.playback_state = state;
        self.state_origin = StateOrigin::Predicted;
    }

    /// Sets a state reported by the decoder.
    pub(crate) fn confirm(&mut self, state: PlaybackState) {
        self.playback_state = state;
        self.state_origin = StateOrigin::Confirmed;
    }

    /// Marks the current state as acknowledged without changing it.
    pub(crate) fn acknowledge(&mut self) {
        self.state_origin = StateOrigin::Confirmed;
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback_state
    }

    pub fn state_origin(&self) -> StateOrigin {
        self.state_origin
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    pub fn is_session_started(&self) -> bool {
        self.is_session_started
    }

    pub fn pending_seek_target_ms(&self) -> Option<u64> {
        self.pending_seek_target_ms
    }

    pub fn loading_progress(&self) -> &LoadingMetrics {
        &self.loading_progress
    }

    pub fn last_error(&self) -> Option<&DecoderError> {
        self.last_error.as_ref()
    }

    /// Builds the read-only view handed to the presentation layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            source: self.source.clone(),
            playback_state: self.playback_state,
            state_origin: self.state_origin,
            position_ms: self.position_ms,
            duration_ms: self.duration_ms,
            is_fullscreen: self.is_fullscreen,
            is_session_started: self.is_session_started,
            loading_progress: self.loading_progress.clone(),
            last_error: self.last_error.clone(),
        }
    }
}

/// What the presentation layer renders from.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SessionSnapshot {
    pub source: Option<String>,
    pub playback_state: PlaybackState,
    pub state_origin: StateOrigin,
    pub position_ms: u64,
    pub duration_ms: u64,
    pub is_fullscreen: bool,
    pub is_session_started: bool,
    pub loading_progress: LoadingMetrics,
    pub last_error: Option<DecoderError>,
}
