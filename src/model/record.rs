//! Decoding of a single input line into a log record.
//!
//! Each line of the input stream is expected to hold one JSON object with the
//! optional fields `namespace`, `time`, `priority` and `payload`. Decoding is
//! all-or-nothing: a line either yields a complete [`LogRecord`] or a
//! [`DecodeError`], never a partially filled record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// One decoded log entry. Transient: it is formatted immediately and dropped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogRecord {
    #[serde(default, deserialize_with = "nullable_string")]
    pub namespace: String,

    /// Opaque display text, never parsed as a date.
    #[serde(default, rename = "time", deserialize_with = "nullable_string")]
    pub timestamp: String,

    #[serde(default, rename = "priority", deserialize_with = "nullable_string")]
    pub severity: String,

    #[serde(default)]
    pub payload: Payload,
}

/// The message body of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Structured(Value),
}

impl Default for Payload {
    fn default() -> Self {
        Payload::Structured(Value::Null)
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Payload::Text(s),
            other => Payload::Structured(other),
        })
    }
}

/// `null` reads as the empty string; any other non-string value is an error.
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Why a line could not be turned into a [`LogRecord`].
#[derive(Debug)]
pub enum DecodeError {
    /// The line is not UTF-8.
    InvalidUtf8,
    /// Syntactically invalid JSON, or a field of the wrong type.
    Json(serde_json::Error),
    /// Valid JSON whose top-level value is not an object.
    NotAnObject,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidUtf8 => write!(f, "line is not valid UTF-8"),
            DecodeError::Json(e) => write!(f, "invalid JSON: {}", e),
            DecodeError::NotAnObject => write!(f, "top-level JSON value is not an object"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        DecodeError::Json(e)
    }
}

/// Decode one line (without its trailing newline) into a record.
pub fn decode(line: &str) -> Result<LogRecord, DecodeError> {
    let value: Value = serde_json::from_str(line)?;
    // Structs also deserialize from JSON arrays, so check the shape first.
    if !value.is_object() {
        return Err(DecodeError::NotAnObject);
    }
    Ok(LogRecord::deserialize(value)?)
}

/// Decode raw line bytes as read from the stream.
///
/// One trailing `\r` is stripped so CRLF input decodes like LF input.
pub fn decode_bytes(line: &[u8]) -> Result<LogRecord, DecodeError> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    let line = std::str::from_utf8(line).map_err(|_| DecodeError::InvalidUtf8)?;
    decode(line)
}
