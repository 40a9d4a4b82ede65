// SPDX-License-Identifier: MPL-2.0
//! `playback_session` coordinates a playback session between a native video
//! decoder and the controls in front of it.
//!
//! It turns user intents (play, pause, seek, quality switch, fullscreen) and
//! decoder events (prepared, buffering, position, completion, error) into one
//! consistent session state, and derives the fullscreen layout from the
//! device's screen and window sizes.

pub mod config;
pub mod domain;
pub mod error;
pub mod session;
pub mod sim;

#[cfg(test)]
mod test_utils;
