// SPDX-License-Identifier: MPL-2.0
//! Normalization of raw decoder callbacks.
//!
//! The native decoder reports events as a name plus an event-data envelope
//! whose shape depends on the event. [`adapt`] turns one such callback into a
//! [`DecoderEvent`], or drops it when the name is not one the coordinator
//! understands. Unknown names are expected as the decoder grows features.

use super::decoder::{DecoderEvent, LoadingMetrics};
use crate::error::DecoderError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw callback as delivered by the decoder bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDecoderEvent {
    pub name: String,
    #[serde(default)]
    pub data: Value,
}

impl RawDecoderEvent {
    pub fn new(name: impl Into<String>, data: Value) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Event without a payload.
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, Value::Null)
    }
}

/// Callback names emitted by the decoder bridge.
pub mod names {
    pub const PREPARED: &str = "prepared";
    pub const LOADING_BEGIN: &str = "loadingBegin";
    pub const LOADING_PROGRESS: &str = "loadingProgress";
    pub const LOADING_END: &str = "loadingEnd";
    pub const RENDERING_START: &str = "renderingStart";
    pub const POSITION_UPDATE: &str = "currentPositionUpdate";
    pub const COMPLETION: &str = "completion";
    pub const ERROR: &str = "error";
}

/// Translates one raw callback.
///
/// Returns `None` for unrecognized names and for payloads missing a field
/// the event cannot do without (duration, position). Error events are never
/// dropped: missing fields fall back to [`DecoderError::UNKNOWN_CODE`] and an
/// empty message.
pub fn adapt(raw: &RawDecoderEvent) -> Option<DecoderEvent> {
    let event = match raw.name.as_str() {
        names::PREPARED => DecoderEvent::Prepared {
            duration_ms: millis_field(&raw.data, "duration")?,
        },
        names::LOADING_BEGIN => DecoderEvent::LoadingBegin,
        names::LOADING_PROGRESS => DecoderEvent::LoadingProgress(metrics(&raw.data)),
        names::LOADING_END => DecoderEvent::LoadingEnd,
        names::RENDERING_START => DecoderEvent::RenderingStart,
        names::POSITION_UPDATE => DecoderEvent::PositionUpdate {
            position_ms: millis_field(&raw.data, "position")?,
        },
        names::COMPLETION => DecoderEvent::Completion,
        names::ERROR => DecoderEvent::Error(decoder_error(&raw.data)),
        other => {
            tracing::debug!(name = other, "ignoring unrecognized decoder event");
            return None;
        }
    };
    Some(event)
}

fn millis_field(data: &Value, key: &str) -> Option<u64> {
    let value = data.get(key);
    let millis = value
        .and_then(Value::as_u64)
        .or_else(|| value.and_then(Value::as_f64).map(|v| v.max(0.0).round() as u64));
    if millis.is_none() {
        tracing::warn!(field = key, payload = %data, "decoder event missing numeric field, dropped");
    }
    millis
}

fn metrics(data: &Value) -> LoadingMetrics {
    match data {
        Value::Object(map) => map.clone(),
        _ => LoadingMetrics::new(),
    }
}

fn decoder_error(data: &Value) -> DecoderError {
    let code = data
        .get("code")
        .and_then(|c| c.as_i64().or_else(|| c.as_str().and_then(|s| s.parse().ok())))
        .unwrap_or(DecoderError::UNKNOWN_CODE);
    let message = data
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default();
    DecoderError::new(code, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prepared_carries_duration() {
        let raw = RawDecoderEvent::new(names::PREPARED, json!({ "duration": 5000 }));
        assert_eq!(
            adapt(&raw),
            Some(DecoderEvent::Prepared { duration_ms: 5000 })
        );
    }

    #[test]
    fn fractional_and_negative_millis_are_normalized() {
        let raw = RawDecoderEvent::new(names::POSITION_UPDATE, json!({ "position": 1499.6 }));
        assert_eq!(
            adapt(&raw),
            Some(DecoderEvent::PositionUpdate { position_ms: 1500 })
        );

        let raw = RawDecoderEvent::new(names::POSITION_UPDATE, json!({ "position": -3 }));
        assert_eq!(
            adapt(&raw),
            Some(DecoderEvent::PositionUpdate { position_ms: 0 })
        );
    }

    #[test]
    fn missing_duration_drops_event() {
        let raw = RawDecoderEvent::new(names::PREPARED, json!({ "width": 1920 }));
        assert_eq!(adapt(&raw), None);
    }

    #[test]
    fn unknown_names_are_dropped() {
        assert_eq!(adapt(&RawDecoderEvent::bare("snapshotTaken")), None);
        assert_eq!(adapt(&RawDecoderEvent::bare("")), None);
    }

    #[test]
    fn loading_progress_keeps_payload_opaque() {
        let raw = RawDecoderEvent::new(
            names::LOADING_PROGRESS,
            json!({ "percent": 42, "netSpeed": 812.5 }),
        );
        match adapt(&raw) {
            Some(DecoderEvent::LoadingProgress(metrics)) => {
                assert_eq!(metrics.get("percent"), Some(&json!(42)));
                assert_eq!(metrics.len(), 2);
            }
            other => panic!("unexpected event: {other:?}"),
        }

        let raw = RawDecoderEvent::new(names::LOADING_PROGRESS, json!(17));
        assert_eq!(
            adapt(&raw),
            Some(DecoderEvent::LoadingProgress(LoadingMetrics::new()))
        );
    }

    #[test]
    fn error_payload_is_translated() {
        let raw = RawDecoderEvent::new(
            names::ERROR,
            json!({ "code": 1001, "message": "network timeout" }),
        );
        assert_eq!(
            adapt(&raw),
            Some(DecoderEvent::Error(DecoderError::new(1001, "network timeout")))
        );
    }

    #[test]
    fn error_without_fields_is_kept() {
        assert_eq!(
            adapt(&RawDecoderEvent::bare(names::ERROR)),
            Some(DecoderEvent::Error(DecoderError::new(
                DecoderError::UNKNOWN_CODE,
                ""
            )))
        );

        let raw = RawDecoderEvent::new(names::ERROR, json!({ "code": "4008" }));
        assert_eq!(
            adapt(&raw),
            Some(DecoderEvent::Error(DecoderError::new(4008, "")))
        );
    }

    #[test]
    fn bare_events_ignore_payload() {
        for (name, expected) in [
            (names::LOADING_BEGIN, DecoderEvent::LoadingBegin),
            (names::LOADING_END, DecoderEvent::LoadingEnd),
            (names::RENDERING_START, DecoderEvent::RenderingStart),
            (names::COMPLETION, DecoderEvent::Completion),
        ] {
            let raw = RawDecoderEvent::new(name, json!({ "extra": true }));
            assert_eq!(adapt(&raw), Some(expected));
        }
    }

    #[test]
    fn raw_event_deserializes_without_data() {
        let raw: RawDecoderEvent = serde_json::from_str(r#"{"name":"completion"}"#).unwrap();
        assert_eq!(raw, RawDecoderEvent::bare(names::COMPLETION));
    }
}
