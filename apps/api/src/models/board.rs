use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::card::{ColumnId, JobCard, COLUMN_ORDER};

/// Schema version of the persisted board document.
pub const BOARD_SCHEMA_VERSION: u32 = 2;

/// Normalized board state: card records by id plus per-column ordered id lists.
///
/// Invariants:
/// - every id in any column list has an entry in `cards_by_id`
/// - every card's `column_id` matches the list containing its id
/// - a card id appears in exactly one column list, exactly once
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    pub version: u32,
    pub cards_by_id: HashMap<Uuid, JobCard>,
    pub column_card_ids: HashMap<ColumnId, Vec<Uuid>>,
}

impl BoardState {
    /// An empty board with every column present.
    pub fn empty() -> Self {
        Self {
            version: BOARD_SCHEMA_VERSION,
            cards_by_id: HashMap::new(),
            column_card_ids: COLUMN_ORDER.iter().map(|c| (*c, Vec::new())).collect(),
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::empty()
    }
}

/// Legacy unversioned board document: a flat array of cards.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyBoardState {
    pub cards: Vec<JobCard>,
}
