//! The persisted game state.

use serde::{Deserialize, Serialize};

use crate::{
    config::EngineConfig,
    points::UserPoints,
    quiz::{QuizStates, Registry, factory::create_quiz_state},
    types::QuizId,
};

/// A quiz that became playable and may still need announcing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingUnlock {
    /// Unlocked quiz.
    pub quiz_id: QuizId,
    /// Its title, for the announcement.
    pub quiz_title: String,
    /// Unix milliseconds.
    #[serde(rename = "unlockedAt")]
    pub unlocked_at_ms: u64,
    /// The host has shown the announcement.
    #[serde(default)]
    pub shown: bool,
}

/// Everything a session persists: quiz states, wallet and unlock
/// announcements. Replaced as a whole on every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// State per quiz id.
    pub quiz_states: QuizStates,
    /// The global wallet.
    pub user_points: UserPoints,
    /// Unlocks in the order they happened.
    #[serde(default)]
    pub pending_unlocks: Vec<PendingUnlock>,
}

impl GameSnapshot {
    /// Fresh state for every quiz in the catalog and a starting wallet.
    pub fn fresh(registry: &Registry, config: &EngineConfig, ts_ms: u64) -> Self {
        let quiz_states = registry
            .iter()
            .map(|cfg| (cfg.quiz.id.clone(), create_quiz_state(cfg)))
            .collect();
        Self {
            quiz_states,
            user_points: UserPoints::initial(config, ts_ms),
            pending_unlocks: Vec::new(),
        }
    }

    /// True when an unlock for `quiz_id` is already recorded.
    pub fn has_pending_unlock(&self, quiz_id: &str) -> bool {
        self.pending_unlocks.iter().any(|p| p.quiz_id == quiz_id)
    }
}
