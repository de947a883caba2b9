//! Status partition & sort.
//!
//! Pure, non-mutating views over a card snapshot: the subsequence of cards
//! in one column, ascending by rank key. Sorting is plain string comparison
//! (a missing key sorts first) and stable, so ties keep their input order.

use serde::Serialize;

use crate::card::Card;
use crate::config::BoardConfig;
use crate::identity::StatusValue;
use crate::status::{Column, UNASSIGNED_COLUMN_LABEL};

pub fn cards_in_status<'a>(cards: &'a [Card], status: &StatusValue) -> Vec<&'a Card> {
    let mut group: Vec<&Card> = cards
        .iter()
        .filter(|card| card.status.status() == Some(status))
        .collect();
    group.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
    group
}

pub fn cards_without_status(cards: &[Card]) -> Vec<&Card> {
    let mut group: Vec<&Card> = cards
        .iter()
        .filter(|card| card.status.is_unassigned())
        .collect();
    group.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
    group
}

pub fn cards_in_column<'a>(cards: &'a [Card], column: &Column) -> Vec<&'a Card> {
    match column {
        Column::Status(status) => cards_in_status(cards, status),
        Column::Unassigned => cards_without_status(cards),
    }
}

/// One rendered column of the board snapshot.
#[derive(Clone, Debug, Serialize)]
pub struct BoardColumn<'a> {
    pub column: Column,
    pub label: String,
    pub cards: Vec<&'a Card>,
}

/// The ordered column snapshot the host renders: the unassigned column first
/// (unless hidden), then the vocabulary in configured order.
pub fn board_columns<'a>(config: &BoardConfig, cards: &'a [Card]) -> Vec<BoardColumn<'a>> {
    let mut columns = Vec::with_capacity(config.vocabulary.len() + 1);
    if !config.hide_unassigned_column {
        columns.push(BoardColumn {
            column: Column::Unassigned,
            label: UNASSIGNED_COLUMN_LABEL.to_string(),
            cards: cards_without_status(cards),
        });
    }
    for def in config.vocabulary.iter() {
        columns.push(BoardColumn {
            column: Column::Status(def.value().clone()),
            label: def.label().to_string(),
            cards: cards_in_status(cards, def.value()),
        });
    }
    columns
}
