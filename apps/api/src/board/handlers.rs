use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::board::filters::{self, BoardFilter, FilteredBoard};
use crate::board::logic;
use crate::board::validation::CardPayload;
use crate::errors::AppError;
use crate::models::board::BoardState;
use crate::models::card::{ColumnId, JobCard};
use crate::state::AppState;

/// Applies a mutation under the write lock and persists the result before
/// releasing it. A failed save rolls the in-memory board back so it never
/// drifts ahead of the durable copy.
async fn mutate<F>(state: &AppState, apply: F) -> Result<BoardState, AppError>
where
    F: FnOnce(&mut BoardState) -> Result<(), AppError>,
{
    let mut board = state.board.write().await;
    let snapshot = board.clone();
    apply(&mut board)?;

    match state.store.save(&board).await {
        Ok(()) => Ok(board.clone()),
        Err(e) => {
            *board = snapshot;
            Err(e)
        }
    }
}

/// GET /api/v1/board
pub async fn handle_get_board(State(state): State<AppState>) -> Json<BoardState> {
    Json(state.board.read().await.clone())
}

/// GET /api/v1/board/cards
pub async fn handle_list_cards(
    State(state): State<AppState>,
    Query(filter): Query<BoardFilter>,
) -> Json<FilteredBoard> {
    let board = state.board.read().await;
    Json(filters::apply(&board, &filter))
}

/// POST /api/v1/board/cards
pub async fn handle_create_card(
    State(state): State<AppState>,
    Json(payload): Json<CardPayload>,
) -> Result<(StatusCode, Json<JobCard>), AppError> {
    let card = payload.into_card(Uuid::new_v4())?;
    let id = card.id;

    let board = mutate(&state, move |b| {
        logic::upsert_card(b, card);
        Ok(())
    })
    .await?;

    let stored = board
        .cards_by_id
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("card {id} missing after insert")))?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// PUT /api/v1/board/cards/:id
pub async fn handle_update_card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CardPayload>,
) -> Result<Json<JobCard>, AppError> {
    let card = payload.into_card(id)?;

    let board = mutate(&state, move |b| {
        if !b.cards_by_id.contains_key(&id) {
            return Err(AppError::NotFound(format!("Card {id} not found")));
        }
        logic::upsert_card(b, card);
        Ok(())
    })
    .await?;

    let stored = board
        .cards_by_id
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("card {id} missing after update")))?;
    Ok(Json(stored))
}

/// DELETE /api/v1/board/cards/:id
pub async fn handle_delete_card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    mutate(&state, move |b| {
        if !b.cards_by_id.contains_key(&id) {
            return Err(AppError::NotFound(format!("Card {id} not found")));
        }
        logic::remove_card(b, id);
        Ok(())
    })
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub to_column: ColumnId,
    pub to_index: usize,
}

/// POST /api/v1/board/cards/:id/move
pub async fn handle_move_card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<BoardState>, AppError> {
    let board = mutate(&state, move |b| {
        if !b.cards_by_id.contains_key(&id) {
            return Err(AppError::NotFound(format!("Card {id} not found")));
        }
        logic::move_card(b, id, req.to_column, req.to_index);
        Ok(())
    })
    .await?;

    Ok(Json(board))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub active_id: Uuid,
    pub over_id: Uuid,
}

/// POST /api/v1/board/columns/:column_id/reorder
pub async fn handle_reorder_column(
    State(state): State<AppState>,
    Path(column_id): Path<ColumnId>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<BoardState>, AppError> {
    let board = mutate(&state, move |b| {
        logic::reorder_within_column(b, column_id, req.active_id, req.over_id);
        Ok(())
    })
    .await?;

    Ok(Json(board))
}
