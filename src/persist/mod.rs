//! Snapshot persistence contract and adapters.

/// SQLite-backed snapshot store.
pub mod sqlite;

use thiserror::Error;

use crate::core::snapshot::GameSnapshot;

/// Failure of a persistence adapter.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Database failure.
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Payload could not be encoded or decoded.
    #[error("serde: {0}")]
    Serde(#[from] serde_json::Error),
    /// Anything else, e.g. an unsupported payload version.
    #[error("{0}")]
    Message(String),
}

/// Result alias for persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Where a session's [`GameSnapshot`] lives between runs.
pub trait SnapshotStore: Send {
    /// Latest saved snapshot; `None` when nothing was saved yet.
    fn load(&self) -> PersistResult<Option<GameSnapshot>>;
    /// Save `snapshot` as the latest one.
    fn save(&mut self, snapshot: &GameSnapshot) -> PersistResult<()>;
    /// Forget every saved snapshot.
    fn clear(&mut self) -> PersistResult<()> {
        Ok(())
    }
}

/// Keeps the latest snapshot in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySnapshotStore {
    latest: Option<GameSnapshot>,
    saves: usize,
}

impl MemorySnapshotStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> PersistResult<Option<GameSnapshot>> {
        Ok(self.latest.clone())
    }

    fn save(&mut self, snapshot: &GameSnapshot) -> PersistResult<()> {
        self.latest = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }

    fn clear(&mut self) -> PersistResult<()> {
        self.latest = None;
        Ok(())
    }
}
