pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::board::handlers as board;
use crate::outreach::handlers as outreach;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Board API
        .route("/api/v1/board", get(board::handle_get_board))
        .route(
            "/api/v1/board/cards",
            get(board::handle_list_cards).post(board::handle_create_card),
        )
        .route(
            "/api/v1/board/cards/:id",
            put(board::handle_update_card).delete(board::handle_delete_card),
        )
        .route("/api/v1/board/cards/:id/move", post(board::handle_move_card))
        .route(
            "/api/v1/board/columns/:column_id/reorder",
            post(board::handle_reorder_column),
        )
        // Outreach API
        .route("/api/v1/outreach/draft", post(outreach::handle_draft))
        .with_state(state)
}
