//! Contract-violation errors raised by engine operations.
//!
//! Expected negative outcomes (wrong answers, ineligible hints) are not
//! errors; see [`crate::hint::HintDenial`] and [`crate::core::session::AnswerOutcome`].

use thiserror::Error;

use crate::types::{HintId, QuestionId, QuizId};

/// Raised when the host passes ids the engine does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No quiz with this id in the registry or snapshot.
    #[error("unknown quiz `{0}`")]
    UnknownQuiz(QuizId),
    /// The quiz has no question with this id.
    #[error("quiz `{quiz_id}` has no question {question_id}")]
    UnknownQuestion {
        /// Quiz that was searched.
        quiz_id: QuizId,
        /// Missing question id.
        question_id: QuestionId,
    },
    /// The question declares no hint with this id.
    #[error("question {question_id} has no hint `{hint_id}`")]
    UnknownHint {
        /// Question that was searched.
        question_id: QuestionId,
        /// Missing hint id.
        hint_id: HintId,
    },
    /// The quiz state carries no hint bookkeeping for the question.
    #[error("no hint state for question {0}")]
    MissingHintState(QuestionId),
    /// A quiz id was registered twice.
    #[error("quiz `{0}` is already registered")]
    DuplicateQuiz(QuizId),
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
