//! Shared primitive IDs and the question status enum.

use serde::{Deserialize, Serialize};

/// Catalog-wide quiz identifier.
pub type QuizId = String;
/// Question identifier, unique within one quiz.
pub type QuestionId = u32;
/// Hint identifier, unique within one question.
pub type HintId = String;
/// Monotonic point-transaction identifier.
pub type TxId = u64;
/// Point amount. Balances never go negative.
pub type Points = u64;

/// Progression status of a single question.
///
/// Transitions are monotonic: `Inactive -> Active -> Solved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    /// Locked, not yet shown to the player.
    Inactive,
    /// Open for answering.
    Active,
    /// Answered correctly.
    Solved,
}

impl QuestionStatus {
    /// True for `Solved`.
    pub const fn is_solved(self) -> bool {
        matches!(self, Self::Solved)
    }
}
