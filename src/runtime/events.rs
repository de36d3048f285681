//! Runtime event stream payloads.

use crate::types::{Points, QuestionId, QuizId};

/// Events emitted from the single-writer runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// An answer was judged.
    AnswerChecked {
        /// Quiz of the question.
        quiz_id: QuizId,
        /// Answered question.
        question_id: QuestionId,
        /// Whether it was accepted.
        correct: bool,
    },
    /// The wallet balance changed.
    PointsChanged {
        /// New balance.
        total_points: Points,
    },
    /// Every question of a quiz is solved.
    QuizCompleted {
        /// Finished quiz.
        quiz_id: QuizId,
    },
    /// A locked quiz became playable.
    QuizUnlocked {
        /// Unlocked quiz.
        quiz_id: QuizId,
        /// Its title.
        quiz_title: String,
    },
    /// A hint was revealed.
    HintApplied {
        /// Quiz of the question.
        quiz_id: QuizId,
        /// Question of the hint.
        question_id: QuestionId,
        /// Revealed hint.
        hint_id: String,
        /// Points paid.
        points_deducted: Points,
    },
    /// One quiz was reset.
    QuizReset {
        /// Reset quiz.
        quiz_id: QuizId,
    },
    /// The whole game was reset.
    AllReset,
    /// The snapshot was saved.
    Checkpointed {
        /// Unix milliseconds of the save.
        ts_ms: u64,
    },
}
