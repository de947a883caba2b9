//! Identity atoms.
//!
//! CardId: record identifier assigned by the host collection
//! StatusValue: configured status identifier (column identity)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, InvalidId};
use crate::status::UNASSIGNED_COLUMN_ID;

/// Card identifier - non-empty string after trimming.
///
/// The host collection mints these; validation only rejects
/// empty/whitespace-only values.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardId(String);

impl CardId {
    pub fn new(s: impl Into<String>) -> Result<Self, BoardError> {
        let s = s.into();
        if s.trim().is_empty() {
            Err(InvalidId::Card {
                raw: s,
                reason: "empty".into(),
            }
            .into())
        } else {
            Ok(Self(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardId({:?})", self.0)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CardId {
    type Error = BoardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        CardId::new(s)
    }
}

impl From<CardId> for String {
    fn from(id: CardId) -> String {
        id.0
    }
}

/// Status identifier - non-empty string after trimming.
///
/// The literal `null` is reserved: it is the unassigned-column sentinel
/// (legacy boards persisted it verbatim) and can never name a real status.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StatusValue(String);

impl StatusValue {
    pub fn new(s: impl Into<String>) -> Result<Self, BoardError> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(InvalidId::Status {
                raw: s,
                reason: "empty".into(),
            }
            .into());
        }
        if s == UNASSIGNED_COLUMN_ID {
            return Err(InvalidId::Status {
                raw: s,
                reason: "reserved for the unassigned column".into(),
            }
            .into());
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Boundary conversion for values already screened against the sentinel.
    pub(crate) fn from_trusted(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Debug for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StatusValue({:?})", self.0)
    }
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for StatusValue {
    type Error = BoardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        StatusValue::new(s)
    }
}

impl From<StatusValue> for String {
    fn from(value: StatusValue) -> String {
        value.0
    }
}
