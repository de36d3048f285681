//! Quiz content and per-quiz runtime state.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{
    error::{EngineError, EngineResult},
    hint::{Hint, UsedHint},
    types::{HintId, QuestionId, QuestionStatus, QuizId},
};

/// One picture question. Immutable content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique within its quiz.
    pub id: QuestionId,
    /// Canonical answer.
    pub answer: String,
    /// Other accepted spellings or names.
    #[serde(default)]
    pub alternative_answers: Vec<String>,
    /// Hints in display order.
    #[serde(default)]
    pub hints: Vec<Hint>,
}

impl Question {
    /// Look up a declared hint.
    pub fn hint(&self, hint_id: &str) -> Option<&Hint> {
        self.hints.iter().find(|h| h.id == hint_id)
    }
}

/// A question together with its progression status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionState {
    /// The content.
    #[serde(flatten)]
    pub question: Question,
    /// Where the question stands.
    pub status: QuestionStatus,
}

impl QuestionState {
    /// Question id.
    pub fn id(&self) -> QuestionId {
        self.question.id
    }
}

/// A quiz as authored. Immutable content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// Unique across the catalog.
    pub id: QuizId,
    /// Display title.
    pub title: String,
    /// Questions in authored order.
    pub questions: Vec<Question>,
}

/// Gate on another quiz's recorded progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum UnlockCondition {
    /// Every question of the required quiz must be solved.
    Playthrough {
        /// Quiz that has to be finished.
        required_quiz_id: QuizId,
        /// Text shown on the locked card.
        description: String,
    },
    /// A number of questions of the required quiz must be solved.
    Progress {
        /// Quiz whose progress counts.
        required_quiz_id: QuizId,
        /// Solved questions needed.
        required_questions_solved: usize,
        /// Text shown on the locked card.
        description: String,
    },
}

impl UnlockCondition {
    /// Quiz the condition depends on.
    pub fn required_quiz_id(&self) -> &str {
        match self {
            Self::Playthrough { required_quiz_id, .. } | Self::Progress { required_quiz_id, .. } => {
                required_quiz_id
            }
        }
    }

    /// Text shown on the locked card.
    pub fn description(&self) -> &str {
        match self {
            Self::Playthrough { description, .. } | Self::Progress { description, .. } => description,
        }
    }
}

fn default_order() -> i32 {
    1
}

fn default_initial_unlocked() -> usize {
    2
}

/// A quiz plus its catalog metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizConfig {
    /// The content.
    #[serde(flatten)]
    pub quiz: Quiz,
    /// Locked until `unlock_condition` is met.
    #[serde(default)]
    pub initially_locked: bool,
    /// Gate for a locked quiz. A locked quiz without condition counts as open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock_condition: Option<UnlockCondition>,
    /// Catalog sort key.
    #[serde(default = "default_order")]
    pub order: i32,
    /// Questions that start `Active`; the rest start `Inactive`.
    ///
    /// Defaults to 2 when missing from serialized data, independent of
    /// [`crate::config::EngineConfig::default_initial_unlocked_questions`].
    #[serde(default = "default_initial_unlocked")]
    pub initial_unlocked_questions: usize,
}

impl QuizConfig {
    /// Quiz id.
    pub fn id(&self) -> &str {
        &self.quiz.id
    }
}

/// Hint bookkeeping for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintState {
    /// Question this state belongs to.
    pub question_id: QuestionId,
    /// Revealed hints in reveal order.
    #[serde(default)]
    pub used_hints: Vec<UsedHint>,
    /// Incorrect submissions so far.
    #[serde(default)]
    pub wrong_attempts: u32,
    /// Auto-free hints already consumed.
    #[serde(default)]
    pub auto_free_hints_used: BTreeSet<HintId>,
}

impl HintState {
    /// Fresh state: nothing used, no wrong attempts.
    pub fn new(question_id: QuestionId) -> Self {
        Self {
            question_id,
            used_hints: Vec::new(),
            wrong_attempts: 0,
            auto_free_hints_used: BTreeSet::new(),
        }
    }

    /// True when the hint appears in `used_hints`.
    pub fn has_used(&self, hint_id: &str) -> bool {
        self.used_hints.iter().any(|h| h.id == hint_id)
    }
}

/// Runtime state of one quiz.
///
/// Replaced wholesale by transition functions; `completed_questions` always
/// equals the number of `Solved` questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizState {
    /// Quiz id.
    pub id: QuizId,
    /// Quiz title.
    pub title: String,
    /// Questions with status, in authored order.
    pub questions: Vec<QuestionState>,
    /// Number of solved questions.
    pub completed_questions: usize,
    /// Hint bookkeeping keyed by question id.
    #[serde(default)]
    pub hint_states: BTreeMap<QuestionId, HintState>,
}

impl QuizState {
    /// Position of a question in `questions`.
    pub fn question_index(&self, question_id: QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| q.id() == question_id)
    }

    /// Look up a question or fail with [`EngineError::UnknownQuestion`].
    pub fn question(&self, question_id: QuestionId) -> EngineResult<&QuestionState> {
        self.question_index(question_id)
            .map(|i| &self.questions[i])
            .ok_or_else(|| EngineError::UnknownQuestion {
                quiz_id: self.id.clone(),
                question_id,
            })
    }

    /// Look up hint bookkeeping or fail with [`EngineError::MissingHintState`].
    pub fn hint_state(&self, question_id: QuestionId) -> EngineResult<&HintState> {
        self.hint_states
            .get(&question_id)
            .ok_or(EngineError::MissingHintState(question_id))
    }

    /// Question ids in authored order.
    pub fn question_ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.questions.iter().map(QuestionState::id)
    }
}

/// Runtime state of every quiz, keyed by quiz id.
pub type QuizStates = BTreeMap<QuizId, QuizState>;
