// SPDX-License-Identifier: MPL-2.0
//! Bridge from host lifecycle signals to coordinator commands.

use super::coordinator::SessionCoordinator;
use super::geometry::Dimensions;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Application state as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppState {
    #[default]
    Active,
    Inactive,
    Background,
}

/// Signals the host platform delivers.
#[derive(Debug, Clone, PartialEq)]
pub enum HostSignal {
    AppStateChanged(AppState),
    BackRequested,
    DimensionsChanged(Dimensions),
}

/// What became of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalOutcome {
    /// Forwarded to the coordinator.
    Forwarded,
    /// Not a transition the coordinator cares about.
    Ignored,
    /// Back request consumed by the player.
    BackHandled,
    /// Back request left to the host's default navigation.
    BackUnhandled,
}

/// Forwards host signals to a [`SessionCoordinator`].
///
/// Only an actual transition into the background is forwarded; repeated
/// reports of the same app state are ignored.
#[derive(Debug, Default)]
pub struct LifecycleGateway {
    app_state: AppState,
}

impl LifecycleGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last app state seen.
    pub fn app_state(&self) -> AppState {
        self.app_state
    }

    pub fn handle(
        &mut self,
        coordinator: &mut SessionCoordinator,
        signal: HostSignal,
    ) -> SignalOutcome {
        match signal {
            HostSignal::AppStateChanged(state) => {
                let previous = std::mem::replace(&mut self.app_state, state);
                tracing::debug!(?previous, current = ?state, "app state changed");
                if state == AppState::Background && previous != AppState::Background {
                    coordinator.on_app_backgrounded();
                    SignalOutcome::Forwarded
                } else {
                    SignalOutcome::Ignored
                }
            }
            HostSignal::BackRequested => {
                if coordinator.on_back_request() {
                    SignalOutcome::BackHandled
                } else {
                    SignalOutcome::BackUnhandled
                }
            }
            HostSignal::DimensionsChanged(dimensions) => {
                coordinator.update_dimensions(dimensions);
                SignalOutcome::Forwarded
            }
        }
    }

    /// Handles every signal queued on `signals`, in order, without waiting.
    pub fn pump(
        &mut self,
        coordinator: &mut SessionCoordinator,
        signals: &mut mpsc::UnboundedReceiver<HostSignal>,
    ) -> Vec<SignalOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(signal) = signals.try_recv() {
            outcomes.push(self.handle(coordinator, signal));
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerOptions;
    use crate::domain::{PlaybackState, Size};
    use crate::session::{DecoderCommand, DecoderCommandSender, DecoderEvent};
    use crate::test_utils::drain;

    fn playing() -> (
        SessionCoordinator,
        mpsc::UnboundedReceiver<DecoderCommand>,
    ) {
        let (sender, mut rx) = DecoderCommandSender::channel();
        let mut coordinator = SessionCoordinator::new(PlayerOptions::with_source("a"), sender);
        coordinator.on_decoder_event(DecoderEvent::RenderingStart);
        drain(&mut rx);
        (coordinator, rx)
    }

    #[test]
    fn background_transition_pauses_once() {
        let (mut coordinator, mut rx) = playing();
        let mut gateway = LifecycleGateway::new();

        assert_eq!(
            gateway.handle(&mut coordinator, HostSignal::AppStateChanged(AppState::Background)),
            SignalOutcome::Forwarded
        );
        assert_eq!(
            gateway.handle(&mut coordinator, HostSignal::AppStateChanged(AppState::Background)),
            SignalOutcome::Ignored
        );
        assert_eq!(drain(&mut rx), vec![DecoderCommand::Pause]);
        assert_eq!(coordinator.snapshot().playback_state, PlaybackState::Paused);
        assert_eq!(gateway.app_state(), AppState::Background);
    }

    #[test]
    fn foreground_does_not_resume() {
        let (mut coordinator, mut rx) = playing();
        let mut gateway = LifecycleGateway::new();
        gateway.handle(&mut coordinator, HostSignal::AppStateChanged(AppState::Background));
        drain(&mut rx);

        assert_eq!(
            gateway.handle(&mut coordinator, HostSignal::AppStateChanged(AppState::Active)),
            SignalOutcome::Ignored
        );
        assert!(drain(&mut rx).is_empty());
        assert_eq!(coordinator.snapshot().playback_state, PlaybackState::Paused);
    }

    #[test]
    fn back_request_reports_handling() {
        let (mut coordinator, _rx) = playing();
        let mut gateway = LifecycleGateway::new();

        assert_eq!(
            gateway.handle(&mut coordinator, HostSignal::BackRequested),
            SignalOutcome::BackUnhandled
        );
        coordinator.enter_fullscreen();
        assert_eq!(
            gateway.handle(&mut coordinator, HostSignal::BackRequested),
            SignalOutcome::BackHandled
        );
        assert!(!coordinator.snapshot().is_fullscreen);
    }

    #[test]
    fn pump_drains_queued_signals_in_order() {
        let (mut coordinator, _rx) = playing();
        let mut gateway = LifecycleGateway::new();
        let (tx, mut signals) = mpsc::unbounded_channel();
        let dimensions = Dimensions::new(Size::new(1000.0, 500.0), Size::new(800.0, 400.0));

        coordinator.enter_fullscreen();
        tx.send(HostSignal::DimensionsChanged(dimensions)).unwrap();
        tx.send(HostSignal::BackRequested).unwrap();
        tx.send(HostSignal::BackRequested).unwrap();

        let outcomes = gateway.pump(&mut coordinator, &mut signals);
        assert_eq!(
            outcomes,
            vec![
                SignalOutcome::Forwarded,
                SignalOutcome::BackHandled,
                SignalOutcome::BackUnhandled,
            ]
        );
        assert_eq!(coordinator.dimensions(), dimensions);
        assert!(gateway.pump(&mut coordinator, &mut signals).is_empty());
    }
}
