//! Reorder-on-drop decision procedure.
//!
//! Pure function of the snapshot it is given: the board retains nothing
//! between calls, and persisting the accepted move is the caller's job.
//! Each computed rank depends only on the neighbor keys read from the
//! snapshot, so no other row is ever renumbered. Two near-simultaneous
//! drags into the same gap can therefore produce colliding keys; that race
//! is accepted rather than serialized through a central sequencer.

use serde::{Deserialize, Serialize};
use tracing::error;

use kanban_rank::{LexoRank, MalformedKey, RankError};

use crate::card::{Card, Principal};
use crate::group::cards_in_column;
use crate::identity::CardId;
use crate::status::{Column, StatusDef, StatusVocabulary};

/// Shown when dragging is disabled or a predicate denies without a message.
pub const NOT_AUTHORISED_MESSAGE: &str = "You are not authorised to perform this action";

/// Shown when the computation itself fails (malformed persisted keys).
pub const GENERIC_FAILURE_MESSAGE: &str = "something went wrong";

/// One end of a drag gesture. Field names mirror the browser drag library's
/// wire shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    pub droppable_id: Column,
    pub index: usize,
}

/// A drop gesture as reported by the UI. A missing destination means the
/// card was dropped outside any column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragResult {
    pub draggable_id: CardId,
    pub source: DragLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<DragLocation>,
}

/// The accepted move: the two fields the caller patches onto the record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardMove {
    pub card_id: CardId,
    pub status: Column,
    pub rank: LexoRank,
}

/// Structured outcome of a drop. Every failure path resolves into one of
/// these; nothing panics and no error escapes to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DropOutcome {
    Accepted(CardMove),
    Rejected { message: String },
    NoOp,
}

impl DropOutcome {
    pub fn accepted(&self) -> Option<&CardMove> {
        match self {
            Self::Accepted(card_move) => Some(card_move),
            Self::Rejected { .. } | Self::NoOp => None,
        }
    }

    pub fn is_no_op(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}

/// Decides whether a drop is permitted and where the moved card lands.
///
/// `cards` is the caller's current snapshot in board load order (ascending
/// rank as served); `drag_enabled` is the externally computed permission to
/// reorder at all.
pub fn decide_drop(
    vocabulary: &StatusVocabulary,
    cards: &[Card],
    drag: &DragResult,
    principal: &Principal,
    drag_enabled: bool,
) -> DropOutcome {
    if !drag_enabled {
        return DropOutcome::Rejected {
            message: NOT_AUTHORISED_MESSAGE.to_string(),
        };
    }
    let Some(destination) = drag.destination.as_ref() else {
        return DropOutcome::NoOp;
    };
    if drag.source.droppable_id == destination.droppable_id
        && drag.source.index == destination.index
    {
        return DropOutcome::NoOp;
    }

    match decide_placement(vocabulary, cards, drag, destination, principal) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(%err, card = %drag.draggable_id, "drop computation failed");
            DropOutcome::Rejected {
                message: GENERIC_FAILURE_MESSAGE.to_string(),
            }
        }
    }
}

fn decide_placement(
    vocabulary: &StatusVocabulary,
    cards: &[Card],
    drag: &DragResult,
    destination: &DragLocation,
    principal: &Principal,
) -> Result<DropOutcome, RankError> {
    let group = cards_in_column(cards, &destination.droppable_id);

    // A stale snapshot may no longer contain the dragged card; predicates
    // then see a bare record with just the id.
    let found = cards.iter().find(|card| card.id == drag.draggable_id);
    let placeholder;
    let card: &Card = match found {
        Some(card) => card,
        None => {
            placeholder = Card::new(drag.draggable_id.clone());
            &placeholder
        }
    };

    if let Some(status) = destination.droppable_id.status() {
        if let Some(validation) = vocabulary.get(status).and_then(StatusDef::drop_validation) {
            let verdict = validation.validate(card, principal);
            if !verdict.drop_able {
                return Ok(DropOutcome::Rejected {
                    message: verdict
                        .message
                        .unwrap_or_else(|| NOT_AUTHORISED_MESSAGE.to_string()),
                });
            }
        }
    }

    let same_column = drag.source.droppable_id == destination.droppable_id;
    let index = destination.index;

    let rank = if group.is_empty() && cards.first().map(|c| &c.id) == Some(&drag.draggable_id) {
        // Degenerate case: the collection's first entry joins an empty
        // column, so nothing has to sort below it.
        LexoRank::min()
    } else if group.is_empty() && index == 0 {
        LexoRank::min().next()
    } else if index == 0 {
        let first = group[0];
        match first.rank.as_deref() {
            Some(raw) => LexoRank::parse(raw)?.prev(),
            // Keyless incumbent: wedge the card between the global floor
            // and the top of the key space.
            None => global_floor(cards)?.between(&LexoRank::max())?,
        }
    } else if is_last_position(same_column, index, group.len()) {
        let last = group[group.len() - 1];
        match last.rank.as_deref() {
            Some(raw) => LexoRank::parse(raw)?.next(),
            None => global_ceiling(cards)?.between(&LexoRank::min())?,
        }
    } else {
        // The pre-move snapshot still counts the moved card's own slot, so
        // a same-column move to a higher index shifts both neighbors up by
        // one.
        let (before_at, after_at) = if same_column && drag.source.index < index {
            (index, index + 1)
        } else {
            (index - 1, index)
        };
        let (Some(before), Some(after)) = (group.get(before_at), group.get(after_at)) else {
            return Ok(DropOutcome::NoOp);
        };
        let before_rank = parse_neighbor_rank(&before.id, before.rank.as_deref())?;
        let after_rank = parse_neighbor_rank(&after.id, after.rank.as_deref())?;
        before_rank.between(&after_rank)?
    };

    Ok(DropOutcome::Accepted(CardMove {
        card_id: drag.draggable_id.clone(),
        status: destination.droppable_id.clone(),
        rank,
    }))
}

/// Same-column moves still count the moved card in the group length, so the
/// last slot is `len - 1`; cross-column moves append at `len`.
fn is_last_position(same_column: bool, index: usize, len: usize) -> bool {
    if same_column {
        index + 1 == len
    } else {
        index == len
    }
}

fn global_floor(cards: &[Card]) -> Result<LexoRank, RankError> {
    match cards.first().and_then(|card| card.rank.as_deref()) {
        Some(raw) => Ok(LexoRank::parse(raw)?),
        None => Ok(LexoRank::min()),
    }
}

fn global_ceiling(cards: &[Card]) -> Result<LexoRank, RankError> {
    match cards.last().and_then(|card| card.rank.as_deref()) {
        Some(raw) => Ok(LexoRank::parse(raw)?),
        None => Ok(LexoRank::max()),
    }
}

fn parse_neighbor_rank(id: &CardId, raw: Option<&str>) -> Result<LexoRank, RankError> {
    match raw {
        Some(raw) => Ok(LexoRank::parse(raw)?),
        None => Err(MalformedKey {
            raw: String::new(),
            reason: format!("card {id} has no order key"),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_position_counts_the_moved_card_only_within_the_column() {
        // Same column: a 3-card group still contains the moved card.
        assert!(is_last_position(true, 2, 3));
        assert!(!is_last_position(true, 3, 3));
        // Cross column: the moved card is not in the group yet.
        assert!(is_last_position(false, 3, 3));
        assert!(!is_last_position(false, 2, 3));
    }

    #[test]
    fn drag_result_uses_the_wire_shape() {
        let json = r#"{
            "draggableId": "doc-1",
            "source": {"droppableId": "todo", "index": 0},
            "destination": {"droppableId": "done", "index": 2}
        }"#;
        let drag: DragResult = serde_json::from_str(json).unwrap();
        assert_eq!(drag.draggable_id.as_str(), "doc-1");
        assert_eq!(drag.source.droppable_id.as_str(), "todo");
        assert_eq!(drag.destination.unwrap().index, 2);
    }

    #[test]
    fn missing_destination_deserializes_as_none() {
        let json = r#"{
            "draggableId": "doc-1",
            "source": {"droppableId": "null", "index": 1}
        }"#;
        let drag: DragResult = serde_json::from_str(json).unwrap();
        assert!(drag.source.droppable_id.is_unassigned());
        assert!(drag.destination.is_none());
    }
}
