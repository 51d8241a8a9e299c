use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::models::board::BoardState;
use crate::storage::BoardStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// In-memory board, seeded from the store at startup. The store holds the
    /// durable copy; every mutation persists before the write lock drops.
    pub board: Arc<RwLock<BoardState>>,
    /// Pluggable persistence. Default: FileStore. MemoryStore backs tests.
    pub store: Arc<dyn BoardStore>,
    pub llm: LlmClient,
    #[allow(dead_code)]
    pub config: Config,
}
