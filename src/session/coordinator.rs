// SPDX-License-Identifier: MPL-2.0
//! Session state coordinator.
//!
//! Owns the [`Session`] and is the only thing that mutates it. Two kinds of
//! input arrive here, in event-loop order:
//!
//! - commands from the user, the parent orchestrator and the host lifecycle
//! - decoder events, through [`SessionCoordinator::on_decoder_event`]
//!
//! Commands set the state they expect (predicted); the next decoder event
//! always wins over a prediction. Decoder commands are fire-and-forget, so no
//! operation here can fail: invalid commands are ignored and logged.
//!
//! State transitions on decoder events:
//! - Prepared: duration known; apply the pending seek or start from 0; re-issue
//!   resume if play was requested before the source was ready
//! - LoadingBegin: Buffering if it interrupts a prepared, started session
//!   that is playing or paused; Loading otherwise
//! - LoadingEnd: Buffering returns to the state it interrupted
//! - RenderingStart: Playing, session started
//! - Completion: Completed
//! - Error: Errored, until `reload()` or a new source
//!
//! A quality switch started while playing keeps playing: the new source is
//! resumed once prepared.

use super::adapter::{self, RawDecoderEvent};
use super::control::{ControlHandle, ControlRequest};
use super::decoder::{Decoder, DecoderCommand, DecoderEvent};
use super::geometry::{self, Dimensions};
use super::ports::{NoopCollaborator, SessionObserver, SystemChrome};
use super::state::{Session, SessionSnapshot};
use crate::config::{DecoderProperties, PlayerOptions};
use crate::domain::{PlaybackState, Presentation, QualityOption};
use tokio::sync::{mpsc, watch};

/// Coordinates one playback session between the decoder and the controls.
pub struct SessionCoordinator {
    session: Session,

    options: PlayerOptions,

    /// State interrupted by a mid-playback rebuffer.
    interrupted_state: Option<PlaybackState>,

    /// Resume once the source being loaded is prepared.
    resume_on_prepared: bool,

    dimensions: Dimensions,

    decoder: Box<dyn Decoder>,

    chrome: Box<dyn SystemChrome>,

    observer: Box<dyn SessionObserver>,

    snapshot_tx: watch::Sender<SessionSnapshot>,

    control: ControlHandle,

    control_rx: mpsc::UnboundedReceiver<ControlRequest>,
}

impl SessionCoordinator {
    /// Creates a coordinator and pushes the initial decoder properties.
    ///
    /// If `options.source` is set, a load cycle for it starts immediately;
    /// otherwise the session stays idle until [`set_source`](Self::set_source).
    pub fn new(options: PlayerOptions, decoder: impl Decoder + 'static) -> Self {
        let (snapshot_tx, _) = watch::channel(SessionSnapshot::default());
        let (control, control_rx) = ControlHandle::channel();
        let mut coordinator = Self {
            session: Session::new(),
            options,
            interrupted_state: None,
            resume_on_prepared: false,
            dimensions: Dimensions::default(),
            decoder: Box::new(decoder),
            chrome: Box::new(NoopCollaborator),
            observer: Box::new(NoopCollaborator),
            snapshot_tx,
            control,
            control_rx,
        };

        coordinator
            .decoder
            .dispatch(DecoderCommand::SetProperty(coordinator.options.decoder.clone()));
        if let Some(source) = coordinator.options.source.clone() {
            coordinator.set_source(source, false);
        }
        coordinator
    }

    /// Sets the system chrome collaborator.
    #[must_use]
    pub fn with_chrome(mut self, chrome: impl SystemChrome + 'static) -> Self {
        self.chrome = Box::new(chrome);
        self
    }

    /// Sets the observer for fullscreen and completion notifications.
    #[must_use]
    pub fn with_observer(mut self, observer: impl SessionObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Returns the session aggregate.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a snapshot of the current session.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Subscribes to snapshots, updated after every change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn options(&self) -> &PlayerOptions {
        &self.options
    }

    /// Hands out a control handle for a parent orchestrator.
    ///
    /// Its requests take effect on the next [`pump_control`](Self::pump_control).
    pub fn control(&self) -> ControlHandle {
        self.control.clone()
    }

    /// Applies every queued control request, in order, without waiting.
    /// Returns how many were applied.
    pub fn pump_control(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(request) = self.control_rx.try_recv() {
            tracing::debug!(?request, "control request");
            request.apply(self);
            applied += 1;
        }
        applied
    }

    // =========================================================================
    // Source
    // =========================================================================

    /// Replaces the current source and starts a new load cycle.
    ///
    /// A quality switch keeps the current position as a pending seek applied
    /// once the new source is prepared. A second switch before that replaces
    /// the pending target. Setting the source already loaded does nothing.
    pub fn set_source(&mut self, identifier: impl Into<String>, is_quality_switch: bool) {
        let identifier = identifier.into();
        if self.session.source() == Some(identifier.as_str()) {
            tracing::debug!(source = %identifier, "source unchanged, ignoring");
            return;
        }

        let resume = is_quality_switch && self.wants_playback();
        tracing::info!(
            source = %identifier,
            quality_switch = is_quality_switch,
            position_ms = self.session.position_ms,
            resume,
            "loading source"
        );
        self.interrupted_state = None;
        self.resume_on_prepared = resume;
        self.session.replace_source(identifier.clone(), is_quality_switch);
        self.decoder.dispatch(DecoderCommand::Load {
            source: identifier,
            auto_play: self.options.auto_play,
        });
        self.publish();
    }

    /// Switches to the rendition with `value` from the quality list.
    pub fn switch_quality(&mut self, value: &str) {
        if self.options.quality_for(value).is_none() {
            tracing::debug!(value, "unknown quality, ignoring");
            return;
        }
        self.set_source(value, true);
    }

    /// Returns the quality list entry matching the current source.
    pub fn current_quality(&self) -> Option<&QualityOption> {
        self.options.quality_for(self.session.source()?)
    }

    // =========================================================================
    // Playback commands
    // =========================================================================

    /// Starts, resumes or restarts playback.
    ///
    /// Restarts from the beginning after completion. The session is marked
    /// Playing right away; decoder events may correct that. Ignored while a
    /// decoder error is pending.
    pub fn play(&mut self) {
        if self.session.last_error.is_some() {
            tracing::debug!("play while errored, ignoring until reload");
            return;
        }
        match self.session.playback_state {
            PlaybackState::Idle => {
                tracing::debug!("play without source, ignoring");
                return;
            }
            PlaybackState::Completed => {
                self.decoder.dispatch(DecoderCommand::Restart);
                self.session.position_ms = 0;
            }
            _ => self.decoder.dispatch(DecoderCommand::Resume),
        }
        self.interrupted_state = None;
        self.resume_on_prepared = false;
        self.session.predict(PlaybackState::Playing);
        self.publish();
    }

    /// Pauses playback. Calling it again re-issues the pause. Ignored while
    /// a decoder error is pending, so the error stays visible.
    pub fn pause(&mut self) {
        if self.session.playback_state == PlaybackState::Idle {
            tracing::debug!("pause without source, ignoring");
            return;
        }
        if self.session.last_error.is_some() {
            tracing::debug!("pause while errored, ignoring");
            return;
        }
        self.decoder.dispatch(DecoderCommand::Pause);
        self.interrupted_state = None;
        self.resume_on_prepared = false;
        self.session.predict(PlaybackState::Paused);
        self.publish();
    }

    /// Retries the current source. The only recovery from an error besides a
    /// new source.
    pub fn reload(&mut self) {
        if self.session.source.is_none() {
            tracing::debug!("reload without source, ignoring");
            return;
        }
        self.session.last_error = None;
        self.session.loading_progress.clear();
        self.interrupted_state = None;
        self.resume_on_prepared = false;
        self.decoder.dispatch(DecoderCommand::Reload);
        self.session.predict(PlaybackState::Loading);
        self.publish();
    }

    /// Seeks to `target_ms`, clamped to the known duration.
    ///
    /// Ignored until the source is prepared. Does not change the playback
    /// state; the position follows from the decoder's next update.
    pub fn seek(&mut self, target_ms: u64) {
        if !self.session.prepared {
            tracing::debug!(target_ms, "seek before prepared, ignoring");
            return;
        }
        let position_ms = target_ms.min(self.session.duration_ms);
        self.decoder.dispatch(DecoderCommand::SeekTo { position_ms });
    }

    /// Pushes new decoder properties.
    pub fn set_properties(&mut self, properties: DecoderProperties) {
        self.options.decoder = properties.clone();
        self.decoder.dispatch(DecoderCommand::SetProperty(properties));
    }

    // =========================================================================
    // Fullscreen
    // =========================================================================

    /// Enters or exits fullscreen.
    pub fn set_fullscreen(&mut self, active: bool) {
        if active {
            self.enter_fullscreen();
        } else {
            self.exit_fullscreen();
        }
    }

    /// Enters fullscreen, hiding system chrome. Ignored when fullscreen is
    /// disabled or already active.
    pub fn enter_fullscreen(&mut self) {
        if !self.options.enable_full_screen {
            tracing::debug!("fullscreen disabled, ignoring");
            return;
        }
        if self.session.is_fullscreen {
            return;
        }
        tracing::info!("entering fullscreen");
        self.session.is_fullscreen = true;
        self.observer.on_fullscreen_changed(true);
        self.chrome.hide_system_navigation();
        self.chrome.set_status_bar_hidden(true);
        self.publish();
    }

    /// Exits fullscreen, restoring system chrome. Ignored when inline.
    pub fn exit_fullscreen(&mut self) {
        if !self.session.is_fullscreen {
            return;
        }
        tracing::info!("exiting fullscreen");
        self.observer.on_fullscreen_changed(false);
        self.session.is_fullscreen = false;
        self.chrome.show_system_navigation();
        self.chrome.set_status_bar_hidden(false);
        self.publish();
    }

    // =========================================================================
    // Host lifecycle
    // =========================================================================

    /// Pauses if playing, rebuffering out of playback, or switching quality
    /// out of playback; the app went to the background.
    pub fn on_app_backgrounded(&mut self) {
        if !self.wants_playback() {
            return;
        }
        tracing::debug!("app backgrounded, pausing");
        self.pause();
    }

    /// Handles a back-navigation request.
    ///
    /// Returns `true` if the request was consumed by leaving fullscreen;
    /// `false` means the host should navigate back as usual.
    pub fn on_back_request(&mut self) -> bool {
        if self.session.is_fullscreen {
            self.exit_fullscreen();
            true
        } else {
            false
        }
    }

    /// Records the latest screen and window sizes.
    pub fn update_dimensions(&mut self, dimensions: Dimensions) {
        self.dimensions = dimensions;
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Resolves the player layout from the latest dimensions.
    pub fn presentation<S>(&self, inline: S) -> Presentation<S> {
        geometry::resolve(
            self.dimensions.screen,
            self.dimensions.window,
            self.session.is_fullscreen,
            inline,
        )
    }

    // =========================================================================
    // Decoder events
    // =========================================================================

    /// Normalizes and applies a raw decoder callback. Unknown callbacks are
    /// dropped.
    pub fn on_raw_decoder_event(&mut self, raw: &RawDecoderEvent) {
        if let Some(event) = adapter::adapt(raw) {
            self.on_decoder_event(event);
        }
    }

    /// Applies a decoder event to the session.
    pub fn on_decoder_event(&mut self, event: DecoderEvent) {
        tracing::debug!(?event, state = ?self.session.playback_state, "decoder event");
        match event {
            DecoderEvent::Prepared { duration_ms } => self.handle_prepared(duration_ms),
            DecoderEvent::LoadingBegin => {
                self.session.loading_progress.clear();
                let state = self.session.playback_state;
                let rebuffering = self.session.is_session_started
                    && self.session.prepared
                    && matches!(
                        state,
                        PlaybackState::Playing | PlaybackState::Paused | PlaybackState::Buffering
                    );
                if rebuffering {
                    if state != PlaybackState::Buffering {
                        self.interrupted_state = Some(state);
                    }
                    self.session.confirm(PlaybackState::Buffering);
                } else {
                    self.session.confirm(PlaybackState::Loading);
                }
            }
            DecoderEvent::LoadingProgress(metrics) => {
                self.session.loading_progress = metrics;
            }
            DecoderEvent::LoadingEnd => {
                self.session.loading_progress.clear();
                // Loading is left for RenderingStart to resolve.
                if self.session.playback_state == PlaybackState::Buffering {
                    let resumed = match self.interrupted_state.take() {
                        Some(PlaybackState::Paused) => PlaybackState::Paused,
                        _ => PlaybackState::Playing,
                    };
                    self.session.confirm(resumed);
                }
            }
            DecoderEvent::RenderingStart => {
                self.interrupted_state = None;
                self.session.is_session_started = true;
                self.session.confirm(PlaybackState::Playing);
            }
            DecoderEvent::PositionUpdate { position_ms } => {
                self.session.position_ms = if self.session.prepared {
                    position_ms.min(self.session.duration_ms)
                } else {
                    position_ms
                };
            }
            DecoderEvent::Completion => {
                self.interrupted_state = None;
                self.resume_on_prepared = false;
                self.session.confirm(PlaybackState::Completed);
                self.observer.on_completion();
            }
            DecoderEvent::Error(error) => {
                tracing::warn!(code = error.code, message = %error.message, "decoder error");
                self.interrupted_state = None;
                self.resume_on_prepared = false;
                self.session.loading_progress.clear();
                self.session.last_error = Some(error);
                self.session.confirm(PlaybackState::Errored);
            }
        }
        self.publish();
    }

    fn handle_prepared(&mut self, duration_ms: u64) {
        self.session.duration_ms = duration_ms;
        self.session.prepared = true;

        match self.session.pending_seek_target_ms.take() {
            Some(target) => {
                let position_ms = target.min(duration_ms);
                tracing::debug!(position_ms, "restoring position after quality switch");
                self.session.position_ms = position_ms;
                self.decoder.dispatch(DecoderCommand::SeekTo { position_ms });
            }
            None => self.session.position_ms = 0,
        }

        let resume = std::mem::take(&mut self.resume_on_prepared);
        match self.session.playback_state {
            PlaybackState::Playing => {
                self.decoder.dispatch(DecoderCommand::Resume);
                self.session.acknowledge();
            }
            PlaybackState::Loading if resume => {
                self.decoder.dispatch(DecoderCommand::Resume);
                self.session.predict(PlaybackState::Playing);
            }
            _ => {}
        }
    }

    /// Whether the user expects playback to be running.
    fn wants_playback(&self) -> bool {
        match self.session.playback_state {
            PlaybackState::Playing => true,
            PlaybackState::Buffering => self.interrupted_state != Some(PlaybackState::Paused),
            PlaybackState::Loading => self.resume_on_prepared,
            _ => false,
        }
    }

    fn publish(&self) {
        let snapshot = self.session.snapshot();
        self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

impl std::fmt::Debug for SessionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCoordinator")
            .field("session", &self.session)
            .field("dimensions", &self.dimensions)
            .finish_non_exhaustive()
    }
}
