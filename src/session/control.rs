// SPDX-License-Identifier: MPL-2.0
//! Imperative control surface for a parent orchestrator.
//!
//! The parent holds a [`ControlHandle`], not the coordinator: it gets exactly
//! two operations and no view of the session. Requests are queued and applied
//! when the owner of the coordinator calls
//! [`SessionCoordinator::pump_control`], in the same event loop as decoder
//! events.

use super::coordinator::SessionCoordinator;
use tokio::sync::mpsc;

/// Commands a parent may issue without access to session internals.
pub trait ImperativeControl {
    /// `true` plays, `false` pauses.
    fn play(&mut self, active: bool);

    /// `true` enters fullscreen, `false` exits it.
    fn fullscreen(&mut self, active: bool);
}

/// A queued [`ImperativeControl`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRequest {
    Play(bool),
    Fullscreen(bool),
}

impl ControlRequest {
    pub(crate) fn apply(self, coordinator: &mut SessionCoordinator) {
        match self {
            Self::Play(true) => coordinator.play(),
            Self::Play(false) => coordinator.pause(),
            Self::Fullscreen(active) => coordinator.set_fullscreen(active),
        }
    }
}

/// Owned, cloneable [`ImperativeControl`] feeding a coordinator's queue.
#[derive(Debug, Clone)]
pub struct ControlHandle {
    requests: mpsc::UnboundedSender<ControlRequest>,
}

impl ControlHandle {
    pub(crate) fn channel() -> (Self, mpsc::UnboundedReceiver<ControlRequest>) {
        let (requests, receiver) = mpsc::unbounded_channel();
        (Self { requests }, receiver)
    }

    fn send(&self, request: ControlRequest) {
        if let Err(err) = self.requests.send(request) {
            tracing::warn!(request = ?err.0, "session dropped, control request lost");
        }
    }
}

impl ImperativeControl for ControlHandle {
    fn play(&mut self, active: bool) {
        self.send(ControlRequest::Play(active));
    }

    fn fullscreen(&mut self, active: bool) {
        self.send(ControlRequest::Fullscreen(active));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerOptions;
    use crate::domain::PlaybackState;
    use crate::session::{DecoderCommand, DecoderCommandSender, DecoderEvent};
    use crate::test_utils::{drain, Recorder};

    fn drive(control: &mut dyn ImperativeControl) {
        control.play(true);
        control.fullscreen(true);
        control.play(false);
    }

    #[test]
    fn requests_apply_in_order_when_pumped() {
        let (sender, mut rx) = DecoderCommandSender::channel();
        let recorder = Recorder::default();
        let mut coordinator = SessionCoordinator::new(PlayerOptions::with_source("a"), sender)
            .with_observer(recorder.clone());
        coordinator.on_decoder_event(DecoderEvent::Prepared { duration_ms: 1000 });
        drain(&mut rx);

        let mut handle = coordinator.control();
        drive(&mut handle);
        assert!(drain(&mut rx).is_empty());

        assert_eq!(coordinator.pump_control(), 3);
        assert_eq!(
            drain(&mut rx),
            vec![DecoderCommand::Resume, DecoderCommand::Pause]
        );
        assert_eq!(coordinator.snapshot().playback_state, PlaybackState::Paused);
        assert!(coordinator.snapshot().is_fullscreen);
        assert_eq!(recorder.fullscreen_changes(), vec![true]);

        handle.fullscreen(false);
        coordinator.pump_control();
        assert!(!coordinator.snapshot().is_fullscreen);
        assert_eq!(coordinator.pump_control(), 0);
    }

    #[test]
    fn handle_outliving_session_drops_requests() {
        let (sender, _rx) = DecoderCommandSender::channel();
        let coordinator = SessionCoordinator::new(PlayerOptions::default(), sender);
        let mut handle = coordinator.control();
        drop(coordinator);

        handle.play(true);
        handle.fullscreen(true);
    }
}
