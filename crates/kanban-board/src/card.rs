//! The card record and the opaque acting-user payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::identity::{CardId, StatusValue};
use crate::status::Column;

/// Acting user forwarded to drop validation. The board never inspects its
/// contents.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(Value);

impl Principal {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Principal {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// One record of the host collection, as the board sees it.
///
/// The rank is carried verbatim as an opaque string: only the rank algebra
/// inspects key structure, everything else sorts by plain string comparison.
/// `extra` is the record's remaining fields, passed through untouched to
/// drop-validation predicates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    #[serde(default, skip_serializing_if = "Column::is_unassigned")]
    pub status: Column,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Card {
    pub fn new(id: CardId) -> Self {
        Self {
            id,
            status: Column::Unassigned,
            rank: None,
            extra: Map::new(),
        }
    }

    pub fn with_status(mut self, status: StatusValue) -> Self {
        self.status = Column::Status(status);
        self
    }

    pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
        self.rank = Some(rank.into());
        self
    }

    /// Sort key for partition ordering: a missing rank sorts first.
    pub fn sort_key(&self) -> &str {
        self.rank.as_deref().unwrap_or("")
    }
}
