//! Board persistence — the whole board is one versioned JSON document,
//! replaced wholesale on every save.
//!
//! The load path degrades instead of failing: an unreadable or structurally
//! invalid current document falls through to a one-shot migration of the
//! legacy format, and that falls through to an empty board.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tempfile::NamedTempFile;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::board::logic::ensure_columns;
use crate::errors::AppError;
use crate::models::board::{BoardState, LegacyBoardState, BOARD_SCHEMA_VERSION};

/// File name of the current, versioned board document.
const BOARD_FILE_V2: &str = "board.v2.json";
/// File name of the legacy, unversioned document (flat array of cards).
const BOARD_FILE_V1: &str = "board.v1.json";

/// Pluggable board persistence.
/// Carried in `AppState` as `Arc<dyn BoardStore>`; `FileStore` is the
/// default backend and `MemoryStore` backs tests.
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Loads the persisted board, migrating or falling back to empty as needed.
    async fn load(&self) -> Result<BoardState, AppError>;

    /// Replaces the persisted board with `state`.
    async fn save(&self, state: &BoardState) -> Result<(), AppError>;
}

/// File-backed store rooted at a data directory.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn current_path(&self) -> PathBuf {
        self.data_dir.join(BOARD_FILE_V2)
    }

    fn legacy_path(&self) -> PathBuf {
        self.data_dir.join(BOARD_FILE_V1)
    }
}

#[async_trait]
impl BoardStore for FileStore {
    async fn load(&self) -> Result<BoardState, AppError> {
        if let Some(state) = read_current(&self.current_path()).await {
            return Ok(state);
        }

        if let Some(migrated) = read_legacy(&self.legacy_path()).await {
            info!(
                "Migrated legacy board document ({} cards)",
                migrated.cards_by_id.len()
            );
            // Persist immediately so the legacy file is read at most once.
            // A failed write-back is retried on the next mutation.
            if let Err(e) = self.save(&migrated).await {
                warn!("Failed to persist migrated board: {e}");
            }
            return Ok(migrated);
        }

        Ok(BoardState::empty())
    }

    async fn save(&self, state: &BoardState) -> Result<(), AppError> {
        let json = serde_json::to_vec_pretty(state).map_err(anyhow::Error::from)?;
        let dir = self.data_dir.clone();
        let path = self.current_path();

        // Blocking filesystem work stays off the async executor.
        tokio::task::spawn_blocking(move || write_atomic(&dir, &path, &json))
            .await
            .map_err(anyhow::Error::from)??;
        Ok(())
    }
}

/// Writes `bytes` to `path` via a temp file in the same directory plus a
/// rename, so readers only ever see a complete document.
fn write_atomic(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    std::fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.persist(path).map_err(|e| AppError::Storage(e.error))?;
    Ok(())
}

/// Reads and structurally validates the current versioned document.
/// Any read, parse, or shape failure yields `None`.
async fn read_current(path: &Path) -> Option<BoardState> {
    let raw = read_optional(path).await?;
    let value: Value = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            warn!("Board document is not valid JSON, ignoring: {e}");
            return None;
        }
    };

    if !looks_like_current(&value) {
        warn!("Board document failed shape check, ignoring");
        return None;
    }

    match serde_json::from_value::<BoardState>(value) {
        Ok(mut state) => {
            ensure_columns(&mut state);
            Some(state)
        }
        Err(e) => {
            warn!("Board document failed to decode, ignoring: {e}");
            None
        }
    }
}

/// Reads the legacy document and rebuilds the normalized form.
async fn read_legacy(path: &Path) -> Option<BoardState> {
    let raw = read_optional(path).await?;
    let value: Value = serde_json::from_str(&raw).ok()?;
    if !looks_like_legacy(&value) {
        return None;
    }
    let legacy: LegacyBoardState = serde_json::from_value(value).ok()?;
    Some(migrate_legacy(legacy))
}

async fn read_optional(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => Some(raw),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!("Failed to read {}: {e}", path.display());
            None
        }
    }
}

/// Field-by-field shape check: versioned object with both normalized maps.
fn looks_like_current(value: &Value) -> bool {
    value.get("version").and_then(Value::as_u64) == Some(BOARD_SCHEMA_VERSION as u64)
        && value.get("cardsById").is_some_and(Value::is_object)
        && value.get("columnCardIds").is_some_and(Value::is_object)
}

fn looks_like_legacy(value: &Value) -> bool {
    value.get("cards").is_some_and(Value::is_array)
}

/// Rebuilds the normalized form from the legacy flat card array. Cards keep
/// their column and append in array order.
fn migrate_legacy(legacy: LegacyBoardState) -> BoardState {
    let mut state = BoardState::empty();
    for card in legacy.cards {
        state
            .column_card_ids
            .entry(card.column_id)
            .or_default()
            .push(card.id);
        state.cards_by_id.insert(card.id, card);
    }
    state
}

/// In-memory store used by tests; honors the same replace-the-blob contract.
#[derive(Default)]
pub struct MemoryStore {
    slot: RwLock<Option<BoardState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BoardStore for MemoryStore {
    async fn load(&self) -> Result<BoardState, AppError> {
        Ok(self
            .slot
            .read()
            .await
            .clone()
            .unwrap_or_else(BoardState::empty))
    }

    async fn save(&self, state: &BoardState) -> Result<(), AppError> {
        *self.slot.write().await = Some(state.clone());
        Ok(())
    }
}
