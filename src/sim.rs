// SPDX-License-Identifier: MPL-2.0
//! Headless driver for a playback session.
//!
//! A script is plain text, one command per line. Blank lines and lines
//! starting with `#` are skipped.
//!
//! ```text
//! play | pause | reload | back
//! seek <ms>
//! speed <factor>
//! source <identifier>
//! quality <value>
//! fullscreen on|off
//! app active|inactive|background
//! resize <screen_w> <screen_h> <window_w> <window_h>
//! event <name> [json payload]
//! ```

use crate::config::PlayerOptions;
use crate::domain::{PlaybackSpeed, Size};
use crate::error::{Error, Result};
use crate::session::{
    self, AppState, DecoderCommand, Dimensions, HostSignal, LifecycleGateway, RawDecoderEvent,
    SessionCoordinator, SessionSnapshot, SignalOutcome,
};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;

/// One parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Play,
    Pause,
    Reload,
    Seek(u64),
    Speed(PlaybackSpeed),
    Source(String),
    Quality(String),
    Fullscreen(bool),
    Signal(HostSignal),
    Event(RawDecoderEvent),
}

impl ScriptCommand {
    /// Parses one line. Returns `Ok(None)` for blank lines and comments.
    pub fn parse(line_number: usize, line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let fail = |message: String| Error::Script {
            line: line_number,
            message,
        };
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };

        let command = match keyword {
            "play" => Self::Play,
            "pause" => Self::Pause,
            "reload" => Self::Reload,
            "back" => Self::Signal(HostSignal::BackRequested),
            "seek" => Self::Seek(
                rest.parse::<u64>()
                    .map_err(|_| fail(format!("invalid seek target '{rest}'")))?,
            ),
            "speed" => Self::Speed(PlaybackSpeed::new(
                rest.parse::<f64>()
                    .map_err(|_| fail(format!("invalid speed '{rest}'")))?,
            )),
            "source" | "quality" if rest.is_empty() => {
                return Err(fail(format!("'{keyword}' needs a value")));
            }
            "source" => Self::Source(rest.to_string()),
            "quality" => Self::Quality(rest.to_string()),
            "fullscreen" => match rest {
                "on" => Self::Fullscreen(true),
                "off" => Self::Fullscreen(false),
                other => return Err(fail(format!("expected on|off, got '{other}'"))),
            },
            "app" => {
                let state = match rest {
                    "active" => AppState::Active,
                    "inactive" => AppState::Inactive,
                    "background" => AppState::Background,
                    other => return Err(fail(format!("unknown app state '{other}'"))),
                };
                Self::Signal(HostSignal::AppStateChanged(state))
            }
            "resize" => {
                let values = rest
                    .split_whitespace()
                    .map(str::parse::<f32>)
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|e| fail(format!("invalid size: {e}")))?;
                let [sw, sh, ww, wh] = values.as_slice() else {
                    return Err(fail(format!("resize needs 4 values, got {}", values.len())));
                };
                Self::Signal(HostSignal::DimensionsChanged(Dimensions::new(
                    Size::new(*sw, *sh),
                    Size::new(*ww, *wh),
                )))
            }
            "event" => {
                let (name, payload) = match rest.split_once(char::is_whitespace) {
                    Some((name, payload)) => (name, payload.trim()),
                    None => (rest, ""),
                };
                if name.is_empty() {
                    return Err(fail("'event' needs a name".to_string()));
                }
                let data = if payload.is_empty() {
                    Value::Null
                } else {
                    serde_json::from_str(payload)
                        .map_err(|e| fail(format!("invalid event payload: {e}")))?
                };
                Self::Event(RawDecoderEvent::new(name, data))
            }
            other => return Err(fail(format!("unknown command '{other}'"))),
        };
        Ok(Some(command))
    }
}

/// Result of applying one command.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Decoder commands issued while applying it.
    pub commands: Vec<DecoderCommand>,
    /// Outcome, for host signals.
    pub outcome: Option<SignalOutcome>,
    pub snapshot: SessionSnapshot,
}

/// A coordinator, its lifecycle gateway and the decoder side of its channel.
pub struct Simulator {
    coordinator: SessionCoordinator,
    gateway: LifecycleGateway,
    decoder_rx: UnboundedReceiver<DecoderCommand>,
}

impl Simulator {
    pub fn new(options: PlayerOptions) -> Self {
        let (coordinator, decoder_rx) = session::create_session(options);
        Self {
            coordinator,
            gateway: LifecycleGateway::new(),
            decoder_rx,
        }
    }

    pub fn coordinator(&self) -> &SessionCoordinator {
        &self.coordinator
    }

    /// Decoder commands issued so far and not yet reported.
    pub fn take_commands(&mut self) -> Vec<DecoderCommand> {
        let mut commands = Vec::new();
        while let Ok(command) = self.decoder_rx.try_recv() {
            commands.push(command);
        }
        commands
    }

    pub fn apply(&mut self, command: ScriptCommand) -> StepReport {
        let mut outcome = None;
        match command {
            ScriptCommand::Play => self.coordinator.play(),
            ScriptCommand::Pause => self.coordinator.pause(),
            ScriptCommand::Reload => self.coordinator.reload(),
            ScriptCommand::Seek(target_ms) => self.coordinator.seek(target_ms),
            ScriptCommand::Speed(speed) => {
                let mut properties = self.coordinator.options().decoder.clone();
                properties.speed = speed;
                self.coordinator.set_properties(properties);
            }
            ScriptCommand::Source(source) => self.coordinator.set_source(source, false),
            ScriptCommand::Quality(value) => self.coordinator.switch_quality(&value),
            ScriptCommand::Fullscreen(active) => self.coordinator.set_fullscreen(active),
            ScriptCommand::Signal(signal) => {
                outcome = Some(self.gateway.handle(&mut self.coordinator, signal));
            }
            ScriptCommand::Event(raw) => self.coordinator.on_raw_decoder_event(&raw),
        }
        StepReport {
            commands: self.take_commands(),
            outcome,
            snapshot: self.coordinator.snapshot(),
        }
    }

    /// Parses and applies a whole script, stopping at the first bad line.
    pub fn run_script(&mut self, script: &str) -> Result<Vec<StepReport>> {
        let mut reports = Vec::new();
        for (index, line) in script.lines().enumerate() {
            if let Some(command) = ScriptCommand::parse(index + 1, line)? {
                reports.push(self.apply(command));
            }
        }
        Ok(reports)
    }
}
