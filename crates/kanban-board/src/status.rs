//! Column identity, drop validation, and the status vocabulary.
//!
//! Column: where a card sits - a configured status or the unassigned column
//! DropVerdict/DropValidation: the optional per-status drop predicate
//! StatusVocabulary: ordered, duplicate-free status configuration

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::card::{Card, Principal};
use crate::error::{BoardError, VocabularyError};
use crate::identity::StatusValue;

/// Droppable id of the unassigned column. Legacy boards persisted this
/// literal string in the status field, so it doubles as a status sentinel.
pub const UNASSIGNED_COLUMN_ID: &str = "null";

/// Display title of the unassigned column.
pub const UNASSIGNED_COLUMN_LABEL: &str = "No status";

/// Board-column identity: a configured status, or the unassigned column.
///
/// The boundary conversion is lossy on purpose: a missing value, the empty
/// string, and the `null` sentinel all mean "unassigned".
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Column {
    #[default]
    Unassigned,
    Status(StatusValue),
}

impl Column {
    pub fn is_unassigned(&self) -> bool {
        matches!(self, Self::Unassigned)
    }

    /// Get the status if this is a status column.
    pub fn status(&self) -> Option<&StatusValue> {
        match self {
            Self::Status(value) => Some(value),
            Self::Unassigned => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Status(value) => value.as_str(),
            Self::Unassigned => UNASSIGNED_COLUMN_ID,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<StatusValue> for Column {
    fn from(value: StatusValue) -> Self {
        Self::Status(value)
    }
}

impl From<Option<String>> for Column {
    fn from(raw: Option<String>) -> Self {
        match raw {
            None => Self::Unassigned,
            Some(s) if s.is_empty() || s == UNASSIGNED_COLUMN_ID => Self::Unassigned,
            Some(s) => Self::Status(StatusValue::from_trusted(s)),
        }
    }
}

impl From<Column> for Option<String> {
    fn from(column: Column) -> Option<String> {
        match column {
            Column::Unassigned => None,
            Column::Status(value) => Some(value.into()),
        }
    }
}

/// Result of a drop-validation predicate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropVerdict {
    pub drop_able: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DropVerdict {
    pub fn allow() -> Self {
        Self {
            drop_able: true,
            message: None,
        }
    }

    pub fn allow_with_message(message: impl Into<String>) -> Self {
        Self {
            drop_able: true,
            message: Some(message.into()),
        }
    }

    pub fn deny(message: impl Into<String>) -> Self {
        Self {
            drop_able: false,
            message: Some(message.into()),
        }
    }

    pub fn deny_silent() -> Self {
        Self {
            drop_able: false,
            message: None,
        }
    }
}

/// Per-status drop gate, consulted with the moved card and the acting
/// principal before any rank computation. Absent predicate means
/// always-permit.
pub trait DropValidation: Send + Sync {
    fn validate(&self, card: &Card, principal: &Principal) -> DropVerdict;
}

impl<F> DropValidation for F
where
    F: Fn(&Card, &Principal) -> DropVerdict + Send + Sync,
{
    fn validate(&self, card: &Card, principal: &Principal) -> DropVerdict {
        self(card, principal)
    }
}

/// One entry of the status vocabulary.
#[derive(Clone)]
pub struct StatusDef {
    value: StatusValue,
    label: String,
    drop_validation: Option<Arc<dyn DropValidation>>,
}

impl StatusDef {
    pub fn new(value: StatusValue, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            drop_validation: None,
        }
    }

    pub fn with_drop_validation(mut self, validation: impl DropValidation + 'static) -> Self {
        self.drop_validation = Some(Arc::new(validation));
        self
    }

    pub fn value(&self) -> &StatusValue {
        &self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn drop_validation(&self) -> Option<&dyn DropValidation> {
        self.drop_validation.as_deref()
    }
}

impl fmt::Debug for StatusDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusDef")
            .field("value", &self.value)
            .field("label", &self.label)
            .field("drop_validation", &self.drop_validation.is_some())
            .finish()
    }
}

/// Ordered set of statuses a collection opts into, configured once and
/// immutable afterwards.
#[derive(Clone, Debug, Default)]
pub struct StatusVocabulary {
    statuses: Vec<StatusDef>,
    default_status: Option<StatusValue>,
}

impl StatusVocabulary {
    pub fn new(statuses: Vec<StatusDef>) -> Result<Self, BoardError> {
        let mut seen = std::collections::HashSet::new();
        for def in &statuses {
            if !seen.insert(def.value().as_str()) {
                return Err(VocabularyError::DuplicateStatus {
                    value: def.value().to_string(),
                }
                .into());
            }
        }
        Ok(Self {
            statuses,
            default_status: None,
        })
    }

    /// Status assigned to new records by the injected select field.
    pub fn with_default_status(mut self, value: StatusValue) -> Result<Self, BoardError> {
        if self.get(&value).is_none() {
            return Err(VocabularyError::UnknownDefault {
                value: value.to_string(),
            }
            .into());
        }
        self.default_status = Some(value);
        Ok(self)
    }

    pub fn get(&self, value: &StatusValue) -> Option<&StatusDef> {
        self.statuses.iter().find(|def| def.value() == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusDef> {
        self.statuses.iter()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn default_status(&self) -> Option<&StatusValue> {
        self.default_status.as_ref()
    }
}
