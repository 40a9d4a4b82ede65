// SPDX-License-Identifier: MPL-2.0
//! Playback session coordination.
//!
//! This module sits between a native video decoder and the player controls.
//! The decoder is driven through [`DecoderCommand`]s and reports
//! [`DecoderEvent`]s; user intents and host lifecycle signals arrive as
//! commands on the [`SessionCoordinator`], which owns all playback state.

pub mod adapter;
mod control;
mod coordinator;
pub mod decoder;
pub mod geometry;
pub mod lifecycle;
pub mod ports;
mod state;

pub use adapter::{adapt, RawDecoderEvent};
pub use control::{ControlHandle, ControlRequest, ImperativeControl};
pub use coordinator::SessionCoordinator;
pub use decoder::{Decoder, DecoderCommand, DecoderCommandSender, DecoderEvent, LoadingMetrics};
pub use geometry::{resolve, Dimensions};
pub use lifecycle::{AppState, HostSignal, LifecycleGateway, SignalOutcome};
pub use ports::{NoopCollaborator, SessionObserver, SystemChrome};
pub use state::{Session, SessionSnapshot};

use crate::config::PlayerOptions;

/// Creates a coordinator wired to a channel-backed decoder.
///
/// Returns the receiver the decoder side drains for commands.
pub fn create_session(
    options: PlayerOptions,
) -> (
    SessionCoordinator,
    tokio::sync::mpsc::UnboundedReceiver<DecoderCommand>,
) {
    let (sender, receiver) = DecoderCommandSender::channel();
    (SessionCoordinator::new(options, sender), receiver)
}
