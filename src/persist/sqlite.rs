//! SQLite-backed snapshot history.
//!
//! Every save appends a row holding a versioned JSON envelope; loading reads
//! the newest row. Old rows can be pruned.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{PersistError, PersistResult, SnapshotStore};
use crate::core::{now_ms, snapshot::GameSnapshot};

const SNAPSHOT_FORMAT_VERSION: u16 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotEnvelope {
    format_version: u16,
    snapshot: GameSnapshot,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeHeader {
    format_version: u16,
}

/// SQLite implementation of [`SnapshotStore`].
pub struct SqliteSnapshotStore {
    conn: Connection,
}

impl SqliteSnapshotStore {
    /// Opens or creates a store at `path`.
    ///
    /// Enables WAL mode and sets `synchronous=NORMAL`.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        let conn = Connection::open(path)?;
        Self::init_connection(conn)
    }

    /// Opens an in-memory store.
    pub fn open_in_memory() -> PersistResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> PersistResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self { conn })
    }

    /// Appends `snapshot` as the newest row.
    pub fn write_snapshot(&mut self, snapshot: &GameSnapshot) -> PersistResult<()> {
        let env = SnapshotEnvelope {
            format_version: SNAPSHOT_FORMAT_VERSION,
            snapshot: snapshot.clone(),
        };
        let payload = serde_json::to_vec(&env)?;
        self.conn.execute(
            "INSERT INTO snapshots(ts_ms, payload) VALUES (?1, ?2)",
            params![now_ms() as i64, payload],
        )?;
        debug!(target: "rateviech", bytes = payload.len(), "snapshot written");
        Ok(())
    }

    /// Reads the newest snapshot.
    pub fn load_latest_snapshot(&self) -> PersistResult<Option<GameSnapshot>> {
        let payload: Option<Vec<u8>> = self
            .conn
            .query_row(
                "SELECT payload FROM snapshots ORDER BY id DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        let Some(payload) = payload else {
            return Ok(None);
        };

        let header: EnvelopeHeader = serde_json::from_slice(&payload)?;
        if header.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(PersistError::Message(format!(
                "unsupported snapshot format version: {}",
                header.format_version
            )));
        }
        let env: SnapshotEnvelope = serde_json::from_slice(&payload)?;
        Ok(Some(env.snapshot))
    }

    /// Deletes all but the newest `keep` rows. Returns the number deleted.
    pub fn prune_keep_latest(&mut self, keep: usize) -> PersistResult<usize> {
        let count = self.conn.execute(
            "DELETE FROM snapshots WHERE id NOT IN (SELECT id FROM snapshots ORDER BY id DESC LIMIT ?1)",
            params![keep as i64],
        )?;
        Ok(count)
    }

    /// Number of stored rows.
    pub fn snapshot_count(&self) -> PersistResult<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM snapshots", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn load(&self) -> PersistResult<Option<GameSnapshot>> {
        self.load_latest_snapshot()
    }

    fn save(&mut self, snapshot: &GameSnapshot) -> PersistResult<()> {
        self.write_snapshot(snapshot)
    }

    fn clear(&mut self) -> PersistResult<()> {
        self.conn.execute("DELETE FROM snapshots", [])?;
        Ok(())
    }
}
