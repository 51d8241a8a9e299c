//! Read-side board filtering — never mutates stored ordering.

use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::board::BoardState;
use crate::models::card::{ColumnId, JobCard, WorkMode, COLUMN_ORDER};

/// Filter over the full board. Absent fields mean "all".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardFilter {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "all_or_one")]
    pub status: Option<ColumnId>,
    #[serde(default, deserialize_with = "all_or_one")]
    pub work_mode: Option<WorkMode>,
}

/// Accepts the select-style wire values: the literal `all` and the empty
/// string both mean "no filter", anything else must be a valid variant.
fn all_or_one<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => T::deserialize(value.into_deserializer()).map(Some),
    }
}

impl BoardFilter {
    /// Whether this card survives the filter. The query matches company or
    /// role, case-insensitively; a card without a work mode only matches
    /// when no work-mode filter is set.
    pub fn matches(&self, card: &JobCard) -> bool {
        if let Some(q) = self.normalized_query() {
            if !card.company.to_lowercase().contains(&q) && !card.role.to_lowercase().contains(&q) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if card.column_id != status {
                return false;
            }
        }
        if let Some(mode) = self.work_mode {
            if card.work_mode != Some(mode) {
                return false;
            }
        }
        true
    }

    fn normalized_query(&self) -> Option<String> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }
}

/// One column of a filtered view, cards in stored order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredColumn {
    pub column_id: ColumnId,
    pub label: &'static str,
    pub cards: Vec<JobCard>,
}

/// Filtered view of the whole board with visible/total counts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredBoard {
    pub columns: Vec<FilteredColumn>,
    pub total_visible: usize,
    pub total_all: usize,
}

/// Applies `filter` to `state`, grouping surviving cards per column in
/// stored order.
pub fn apply(state: &BoardState, filter: &BoardFilter) -> FilteredBoard {
    let mut columns = Vec::with_capacity(COLUMN_ORDER.len());
    let mut total_visible = 0;

    for col in COLUMN_ORDER {
        let cards: Vec<JobCard> = state
            .column_card_ids
            .get(&col)
            .into_iter()
            .flatten()
            .filter_map(|id| state.cards_by_id.get(id))
            .filter(|card| filter.matches(card))
            .cloned()
            .collect();
        total_visible += cards.len();
        columns.push(FilteredColumn {
            column_id: col,
            label: col.label(),
            cards,
        });
    }

    FilteredBoard {
        columns,
        total_visible,
        total_all: state.cards_by_id.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::logic::upsert_card;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn seeded_board() -> BoardState {
        let mut state = BoardState::empty();
        let mk = |company: &str, role: &str, col: ColumnId, mode: Option<WorkMode>| JobCard {
            id: Uuid::new_v4(),
            company: company.to_string(),
            role: role.to_string(),
            link: None,
            applied_date: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
            column_id: col,
            work_mode: mode,
            tech_stack: None,
        };
        upsert_card(&mut state, mk("Acme", "Platform Engineer", ColumnId::Applied, Some(WorkMode::Remote)));
        upsert_card(&mut state, mk("Globex", "Data Engineer", ColumnId::Applied, Some(WorkMode::Hybrid)));
        upsert_card(&mut state, mk("Initech", "SRE", ColumnId::Interview, None));
        state
    }

    #[test]
    fn test_no_filter_shows_everything() {
        let state = seeded_board();
        let view = apply(&state, &BoardFilter::default());
        assert_eq!(view.total_visible, 3);
        assert_eq!(view.total_all, 3);
        assert_eq!(view.columns.len(), COLUMN_ORDER.len());
    }

    #[test]
    fn test_query_matches_company_or_role_case_insensitively() {
        let state = seeded_board();

        let by_company = apply(
            &state,
            &BoardFilter {
                query: Some("acme".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_company.total_visible, 1);

        let by_role = apply(
            &state,
            &BoardFilter {
                query: Some("ENGINEER".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_role.total_visible, 2);
    }

    #[test]
    fn test_blank_query_is_ignored() {
        let state = seeded_board();
        let view = apply(
            &state,
            &BoardFilter {
                query: Some("   ".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(view.total_visible, 3);
    }

    #[test]
    fn test_status_filter_restricts_to_one_column() {
        let state = seeded_board();
        let view = apply(
            &state,
            &BoardFilter {
                status: Some(ColumnId::Interview),
                ..Default::default()
            },
        );
        assert_eq!(view.total_visible, 1);
        assert_eq!(view.total_all, 3);
    }

    #[test]
    fn test_work_mode_filter_excludes_cards_without_mode() {
        let state = seeded_board();
        let view = apply(
            &state,
            &BoardFilter {
                work_mode: Some(WorkMode::Remote),
                ..Default::default()
            },
        );
        // Initech has no work mode and must not match
        assert_eq!(view.total_visible, 1);
    }

    #[test]
    fn test_filters_combine() {
        let state = seeded_board();
        let view = apply(
            &state,
            &BoardFilter {
                query: Some("engineer".to_string()),
                status: Some(ColumnId::Applied),
                work_mode: Some(WorkMode::Hybrid),
            },
        );
        assert_eq!(view.total_visible, 1);
        let applied = &view.columns[0];
        assert_eq!(applied.column_id, ColumnId::Applied);
        assert_eq!(applied.cards[0].company, "Globex");
    }

    #[test]
    fn test_filter_deserializes_camel_case_params() {
        let filter: BoardFilter =
            serde_json::from_str(r#"{"query": "rust", "workMode": "remote"}"#).unwrap();
        assert_eq!(filter.query.as_deref(), Some("rust"));
        assert_eq!(filter.work_mode, Some(WorkMode::Remote));
        assert!(filter.status.is_none());
    }

    #[test]
    fn test_all_and_empty_select_values_mean_no_filter() {
        let filter: BoardFilter =
            serde_json::from_str(r#"{"status": "all", "workMode": ""}"#).unwrap();
        assert!(filter.status.is_none());
        assert!(filter.work_mode.is_none());

        let filter: BoardFilter = serde_json::from_str(r#"{"workMode": "all"}"#).unwrap();
        assert!(filter.work_mode.is_none());
    }

    #[test]
    fn test_unknown_select_value_is_rejected() {
        assert!(serde_json::from_str::<BoardFilter>(r#"{"status": "archived"}"#).is_err());
    }
}
