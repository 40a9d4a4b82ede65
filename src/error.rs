// SPDX-License-Identifier: MPL-2.0
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    /// A simulator script line could not be parsed.
    Script { line: usize, message: String },
}

/// Error reported by the decoder for the current playback attempt.
///
/// This is data, not a Rust error: it travels inside
/// [`DecoderEvent::Error`](crate::session::DecoderEvent::Error) and is kept
/// in the session until `reload()` or a new source clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderError {
    /// Decoder-specific numeric code.
    pub code: i64,

    /// Human readable description, as reported by the decoder.
    pub message: String,
}

impl DecoderError {
    /// Code used when the decoder reports an error without one.
    pub const UNKNOWN_CODE: i64 = -1;

    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for DecoderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "decoder error {}", self.code)
        } else {
            write!(f, "decoder error {}: {}", self.code, self.message)
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Script { line, message } => {
                write!(f, "Script Error (line {}): {}", line, message)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn script_error_mentions_line() {
        let err = Error::Script {
            line: 7,
            message: "unknown command".into(),
        };
        assert_eq!(format!("{}", err), "Script Error (line 7): unknown command");
    }

    #[test]
    fn decoder_error_display() {
        let err = DecoderError::new(1001, "source unreachable");
        assert_eq!(format!("{}", err), "decoder error 1001: source unreachable");
        assert_eq!(
            format!("{}", DecoderError::new(7, "")),
            "decoder error 7"
        );
    }
}
