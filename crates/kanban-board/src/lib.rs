//! Kanban board ordering core.
//!
//! The board itself is rendered by the host CMS; this crate owns the part
//! with real design content: the order-key algebra (re-exported from
//! `kanban-rank`) and the reorder-on-drop decision procedure, plus the
//! configuration surface a host needs to wire them in.
//!
//! Module hierarchy follows type dependency order:
//! - error: InvalidId, VocabularyError, BoardError
//! - identity: CardId, StatusValue
//! - card: Card, Principal
//! - status: Column, DropVerdict, StatusDef, StatusVocabulary
//! - group: partition & sort, column snapshots
//! - reorder: DragResult, DropOutcome, decide_drop
//! - hooks: initial rank assignment
//! - config: BoardConfig, injected field specs

#![forbid(unsafe_code)]

pub mod card;
pub mod config;
pub mod error;
pub mod group;
pub mod hooks;
pub mod identity;
pub mod reorder;
pub mod status;

pub use kanban_rank::{LexoRank, MalformedKey, RankError};

pub use card::{Card, Principal};
pub use config::{BoardConfig, FieldKind, FieldOption, FieldSpec, RANK_FIELD, STATUS_FIELD};
pub use error::{BoardError, InvalidId, VocabularyError};
pub use group::{BoardColumn, board_columns, cards_in_column, cards_in_status, cards_without_status};
pub use hooks::initial_rank;
pub use identity::{CardId, StatusValue};
pub use reorder::{CardMove, DragLocation, DragResult, DropOutcome, decide_drop};
pub use status::{Column, DropValidation, DropVerdict, StatusDef, StatusVocabulary};
