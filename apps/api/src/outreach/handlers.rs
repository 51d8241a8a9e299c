use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::outreach::draft::{draft_message, DraftRequest, DraftResponse};
use crate::state::AppState;

/// POST /api/v1/outreach/draft
pub async fn handle_draft(
    State(state): State<AppState>,
    Json(req): Json<DraftRequest>,
) -> Result<Json<DraftResponse>, AppError> {
    let draft = draft_message(&state.llm, &req).await?;
    Ok(Json(draft))
}
