// SPDX-License-Identifier: MPL-2.0
//! Command and event vocabulary shared with the native decoder.
//!
//! The decoder is opaque: it accepts [`DecoderCommand`]s without reporting
//! success and later reports what happened as [`DecoderEvent`]s.

use crate::config::DecoderProperties;
use crate::error::DecoderError;
use serde_json::{Map, Value};
use tokio::sync::mpsc;

/// Decoder-supplied buffering metrics, kept opaque.
pub type LoadingMetrics = Map<String, Value>;

/// Commands sent to the decoder. All of them are fire-and-forget.
#[derive(Debug, Clone, PartialEq)]
pub enum DecoderCommand {
    /// Open a new source.
    Load { source: String, auto_play: bool },

    /// Continue from the current position.
    Resume,

    /// Pause at the current position.
    Pause,

    /// Play again from the beginning after completion.
    Restart,

    /// Reopen the current source after an error.
    Reload,

    /// Jump to a position.
    SeekTo { position_ms: u64 },

    /// Update decoder properties.
    SetProperty(DecoderProperties),
}

/// Events reported by the decoder, after normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum DecoderEvent {
    /// The source is ready; duration is now known.
    Prepared { duration_ms: u64 },

    /// The decoder started waiting for data.
    LoadingBegin,

    /// Buffering metrics while waiting for data.
    LoadingProgress(LoadingMetrics),

    /// The decoder stopped waiting for data.
    LoadingEnd,

    /// The first frame of the source was rendered.
    RenderingStart,

    /// Current playback position.
    PositionUpdate { position_ms: u64 },

    /// Playback reached the end of the media.
    Completion,

    /// The current playback attempt failed.
    Error(DecoderError),
}

/// Outbound command port to the decoder.
pub trait Decoder {
    /// Hands a command to the decoder. Never blocks, never fails.
    fn dispatch(&mut self, command: DecoderCommand);
}

/// Handle for sending commands to a decoder over a channel.
///
/// The receiving half lives wherever the native decoder is driven; the
/// coordinator only holds this sender.
#[derive(Clone)]
pub struct DecoderCommandSender {
    tx: mpsc::UnboundedSender<DecoderCommand>,
}

impl DecoderCommandSender {
    /// Creates a sender together with the receiver the decoder side drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DecoderCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Returns true if the decoder side dropped its receiver.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl Decoder for DecoderCommandSender {
    fn dispatch(&mut self, command: DecoderCommand) {
        if let Err(err) = self.tx.send(command) {
            tracing::warn!(command = ?err.0, "decoder not running, command dropped");
        }
    }
}

impl std::fmt::Debug for DecoderCommandSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderCommandSender")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_delivers_commands_in_order() {
        let (mut sender, mut rx) = DecoderCommandSender::channel();
        sender.dispatch(DecoderCommand::Resume);
        sender.dispatch(DecoderCommand::SeekTo { position_ms: 1200 });

        assert_eq!(rx.try_recv().ok(), Some(DecoderCommand::Resume));
        assert_eq!(
            rx.try_recv().ok(),
            Some(DecoderCommand::SeekTo { position_ms: 1200 })
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dispatch_after_receiver_dropped_is_silent() {
        let (mut sender, rx) = DecoderCommandSender::channel();
        drop(rx);
        assert!(sender.is_closed());
        sender.dispatch(DecoderCommand::Pause);
    }
}
