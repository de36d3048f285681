//! Game state ownership: the persisted snapshot and the session that swaps it.

/// `GameSession` and answer outcomes.
pub mod session;
/// Persisted snapshot types.
pub mod snapshot;

use std::time::{SystemTime, UNIX_EPOCH};

pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
