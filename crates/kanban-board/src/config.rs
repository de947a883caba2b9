//! Per-collection board configuration and the injected field layout.
//!
//! A collection opts in by splicing two fields into its schema: a select
//! field holding the status and a hidden text field holding the order key.
//! [`BoardConfig::field_specs`] produces both as declarative descriptors the
//! host CMS maps onto its own schema types.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::identity::StatusValue;
use crate::status::StatusVocabulary;

/// Name of the injected status field.
pub const STATUS_FIELD: &str = "kanban_status";

/// Name of the injected order-key field.
pub const RANK_FIELD: &str = "kanban_order_rank";

/// Per-collection plugin configuration.
#[derive(Clone, Debug, Default)]
pub struct BoardConfig {
    pub vocabulary: StatusVocabulary,
    pub hide_unassigned_column: bool,
    /// Opaque admin overrides merged into the status field's admin block
    /// (access rules, visibility). The board forwards them untouched.
    pub status_field_overrides: Map<String, Value>,
}

impl BoardConfig {
    pub fn new(vocabulary: StatusVocabulary) -> Self {
        Self {
            vocabulary,
            hide_unassigned_column: false,
            status_field_overrides: Map::new(),
        }
    }

    /// The two fields a collection opts into: the status select and the
    /// hidden order-key text field.
    pub fn field_specs(&self) -> [FieldSpec; 2] {
        let options = self
            .vocabulary
            .iter()
            .map(|def| FieldOption {
                label: def.label().to_string(),
                value: def.value().clone(),
            })
            .collect();

        let mut admin = self.status_field_overrides.clone();
        // The status selector always lives in the sidebar.
        admin.insert("position".to_string(), Value::from("sidebar"));

        [
            FieldSpec {
                name: STATUS_FIELD,
                label: Some("Kanban status"),
                kind: FieldKind::Select {
                    options,
                    default_value: self.vocabulary.default_status().cloned(),
                },
                hidden: false,
                admin,
            },
            FieldSpec {
                name: RANK_FIELD,
                label: None,
                kind: FieldKind::Text,
                hidden: true,
                admin: Map::new(),
            },
        ]
    }
}

/// Declarative description of one injected field.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub hidden: bool,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub admin: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Select {
        options: Vec<FieldOption>,
        #[serde(skip_serializing_if = "Option::is_none")]
        default_value: Option<StatusValue>,
    },
    Text,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldOption {
    pub label: String,
    pub value: StatusValue,
}
