//! Timestamp-based note identifier with serde support.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `chrono` format of a note identifier.
const ID_FORMAT: &str = "%Y-%m-%d-%H%M%S";

/// Length of every note identifier.
pub const ID_LEN: usize = 17;

/// A unique identifier for notes derived from the UTC creation time.
///
/// Identifiers look like `2020-03-03-032020` and are:
/// - Exactly 17 characters
/// - Lexicographically sortable (chronological order)
/// - Safe to use as a filename stem
///
/// # Examples
///
/// ```
/// use quill::domain::NoteId;
///
/// let id: NoteId = "2020-03-03-032020".parse().unwrap();
/// assert_eq!(id.display_time(), "2020-03-03 03:20:20");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(String);

impl NoteId {
    /// Creates a NoteId for the current moment.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Creates a NoteId from a specific datetime, truncated to whole seconds.
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime.format(ID_FORMAT).to_string())
    }

    /// Returns the first id at or after `self` for which `taken` is false.
    ///
    /// Advances one second at a time, so the result keeps sorting after
    /// every id created before it.
    pub fn next_free(self, mut taken: impl FnMut(&NoteId) -> bool) -> Self {
        let mut candidate = self;
        while taken(&candidate) {
            candidate = Self::from_datetime(candidate.timestamp() + Duration::seconds(1));
        }
        candidate
    }

    /// Returns the timestamp encoded in this ID.
    pub fn timestamp(&self) -> DateTime<Utc> {
        // Every NoteId is validated on construction, so this cannot fail.
        NaiveDateTime::parse_from_str(&self.0, ID_FORMAT)
            .map(|naive| naive.and_utc())
            .unwrap_or_default()
    }

    /// Human-readable time, e.g. `2020-03-03 03:20:20`.
    pub fn display_time(&self) -> String {
        self.timestamp().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId(\"{}\")", self.0)
    }
}

/// Error returned when parsing an invalid note identifier.
#[derive(Debug, Clone)]
pub struct ParseNoteIdError {
    value: String,
    reason: String,
}

impl ParseNoteIdError {
    /// Returns the invalid value that caused this error.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseNoteIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid note id '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for ParseNoteIdError {}

impl FromStr for NoteId {
    type Err = ParseNoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason: &str| ParseNoteIdError {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        if s.len() != ID_LEN {
            return Err(err("expected 17 characters in the form YYYY-MM-DD-HHMMSS"));
        }

        let parsed = NaiveDateTime::parse_from_str(s, ID_FORMAT).map_err(|e| err(&e.to_string()))?;

        // chrono accepts unpadded fields; only the canonical spelling is an id
        if parsed.format(ID_FORMAT).to_string() != s {
            return Err(err("expected the form YYYY-MM-DD-HHMMSS"));
        }

        Ok(Self(s.to_string()))
    }
}

impl Serialize for NoteId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
