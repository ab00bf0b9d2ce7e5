//! Identifier type for upstream transfers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Opaque identifier of an upstream transfer.
///
/// The compliance API reports numeric identifiers, but older state files
/// and other upstream variants carry strings. The original JSON kind is
/// preserved so a persisted set round-trips exactly: the number `42` and the
/// string `"42"` are distinct identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransferId {
    /// Numeric identifier.
    Number(i64),
    /// Numeric identifier above the signed 64-bit range.
    Unsigned(u64),
    /// Textual identifier.
    Text(String),
}

impl TransferId {
    /// Interprets an upstream JSON value as a transfer identifier.
    ///
    /// Returns `None` for values that cannot identify a transfer: `null`,
    /// zero, the empty string, non-integral numbers, and composite values.
    /// Whitespace-only strings are kept verbatim.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_i64().map_or_else(
                || number.as_u64().map(Self::Unsigned),
                |id| (id != 0).then_some(Self::Number(id)),
            ),
            Value::String(text) if !text.is_empty() => Some(Self::Text(text.clone())),
            _ => None,
        }
    }
}

impl From<i64> for TransferId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for TransferId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for TransferId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Unsigned(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}
