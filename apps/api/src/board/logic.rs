//! Board state transitions — pure data moves over the normalized map + order lists.
//!
//! Every function upholds the board invariants: each listed id resolves in
//! `cards_by_id`, each card's `column_id` matches the list holding it, and an
//! id appears in exactly one list.

use uuid::Uuid;

use crate::models::board::BoardState;
use crate::models::card::{ColumnId, JobCard, COLUMN_ORDER};

/// Inserts a new card or updates an existing one.
///
/// New cards land at the top of their column. An update that changes
/// `column_id` moves the id to the top of the destination column; a
/// same-column update leaves ordering alone.
pub fn upsert_card(state: &mut BoardState, card: JobCard) {
    let (id, column) = (card.id, card.column_id);
    let prev_column = state.cards_by_id.insert(id, card).map(|prev| prev.column_id);

    match prev_column {
        // New card: top of its column
        None => state.column_card_ids.entry(column).or_default().insert(0, id),
        // Column changed: move the id between lists
        Some(from) if from != column => {
            if let Some(ids) = state.column_card_ids.get_mut(&from) {
                ids.retain(|x| *x != id);
            }
            state.column_card_ids.entry(column).or_default().insert(0, id);
        }
        Some(_) => {}
    }
}

/// Removes a card from the record map and its column list.
/// Unknown ids are a no-op.
pub fn remove_card(state: &mut BoardState, id: Uuid) {
    let Some(card) = state.cards_by_id.remove(&id) else {
        return;
    };
    if let Some(ids) = state.column_card_ids.get_mut(&card.column_id) {
        ids.retain(|x| *x != id);
    }
}

/// Guarantees every known column has a (possibly empty) id list.
pub fn ensure_columns(state: &mut BoardState) {
    for col in COLUMN_ORDER {
        state.column_card_ids.entry(col).or_default();
    }
}

/// Moves a card into `to_column` at `to_index` (clamped to the list length)
/// and rewrites its `column_id`. Unknown card ids are a no-op.
pub fn move_card(state: &mut BoardState, card_id: Uuid, to_column: ColumnId, to_index: usize) {
    let Some(card) = state.cards_by_id.get_mut(&card_id) else {
        return;
    };
    let from_column = card.column_id;
    card.column_id = to_column;

    if let Some(ids) = state.column_card_ids.get_mut(&from_column) {
        ids.retain(|x| *x != card_id);
    }

    let target = state.column_card_ids.entry(to_column).or_default();
    let clamped = to_index.min(target.len());
    target.insert(clamped, card_id);
}

/// Moves `active_id` to the position currently held by `over_id` within one
/// column. No-op when either id is missing from the list or they are equal.
pub fn reorder_within_column(
    state: &mut BoardState,
    column_id: ColumnId,
    active_id: Uuid,
    over_id: Uuid,
) {
    let Some(ids) = state.column_card_ids.get_mut(&column_id) else {
        return;
    };
    let (Some(from), Some(to)) = (
        ids.iter().position(|x| *x == active_id),
        ids.iter().position(|x| *x == over_id),
    ) else {
        return;
    };
    if from == to {
        return;
    }

    let moved = ids.remove(from);
    ids.insert(to, moved);
}
