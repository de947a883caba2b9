//! Before-change hook: initial rank assignment.

use tracing::debug;

use kanban_rank::{LexoRank, RankError};

use crate::card::Card;

/// Derives the first order key for a card that has just received a status.
///
/// The host calls this from its before-change hook, passing the highest
/// existing key in the card's status group (it performs the lookup: sort
/// descending by rank, limit one). Returns `None` when nothing needs to
/// change - the card already has a key, or has no status - which makes the
/// hook idempotent.
///
/// The result is two steps past the base key; the gap keeps an immediate
/// ordinary insert from landing back on this key.
pub fn initial_rank(
    card: &Card,
    highest_in_status: Option<&str>,
) -> Result<Option<LexoRank>, RankError> {
    if card.rank.is_some() || card.status.is_unassigned() {
        debug!(card = %card.id, "initial rank not needed");
        return Ok(None);
    }
    let base = match highest_in_status {
        Some(raw) => LexoRank::parse(raw)?,
        None => LexoRank::min(),
    };
    Ok(Some(base.next().next()))
}
