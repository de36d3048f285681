//! Building quiz configs, unlock conditions and fresh quiz state.

use std::collections::BTreeMap;

use tracing::debug;

use super::model::{HintState, QuestionState, Quiz, QuizConfig, QuizState, UnlockCondition};
use crate::{config::EngineConfig, types::QuestionStatus};

/// Catalog metadata for [`quiz_config`]. Unset fields take defaults.
#[derive(Debug, Clone, Default)]
pub struct QuizOptions {
    /// Locked until the condition is met.
    pub initially_locked: bool,
    /// Gate for a locked quiz.
    pub unlock_condition: Option<UnlockCondition>,
    /// Catalog sort key; defaults to 1.
    pub order: Option<i32>,
    /// Questions active from the start; defaults to the engine setting.
    pub initial_unlocked_questions: Option<usize>,
}

impl QuizOptions {
    /// Options of a quiz locked behind `condition`.
    pub fn locked_behind(condition: UnlockCondition) -> Self {
        Self {
            initially_locked: true,
            unlock_condition: Some(condition),
            ..Self::default()
        }
    }
}

/// Attach catalog metadata to quiz content.
pub fn quiz_config(quiz: Quiz, options: QuizOptions, defaults: &EngineConfig) -> QuizConfig {
    QuizConfig {
        quiz,
        initially_locked: options.initially_locked,
        unlock_condition: options.unlock_condition,
        order: options.order.unwrap_or(1),
        initial_unlocked_questions: options
            .initial_unlocked_questions
            .unwrap_or(defaults.default_initial_unlocked_questions),
    }
}

/// Condition: finish every question of `required_quiz_id`.
pub fn playthrough_condition(required_quiz_id: &str, description: Option<&str>) -> UnlockCondition {
    UnlockCondition::Playthrough {
        required_quiz_id: required_quiz_id.to_string(),
        description: description.map_or_else(
            || format!("Schließe das Quiz \"{required_quiz_id}\" ab, um dieses Quiz freizuschalten."),
            str::to_string,
        ),
    }
}

/// Condition: solve `required_questions_solved` questions of `required_quiz_id`.
pub fn progress_condition(
    required_quiz_id: &str,
    required_questions_solved: usize,
    description: Option<&str>,
) -> UnlockCondition {
    UnlockCondition::Progress {
        required_quiz_id: required_quiz_id.to_string(),
        required_questions_solved,
        description: description.map_or_else(
            || {
                format!(
                    "Löse {required_questions_solved} Fragen von Quiz \"{required_quiz_id}\", \
                     um dieses Quiz freizuschalten."
                )
            },
            str::to_string,
        ),
    }
}

/// The first `unlocked` questions start `Active`, the rest `Inactive`.
pub fn initial_statuses(count: usize, unlocked: usize) -> Vec<QuestionStatus> {
    (0..count)
        .map(|i| {
            if i < unlocked {
                QuestionStatus::Active
            } else {
                QuestionStatus::Inactive
            }
        })
        .collect()
}

/// Fresh runtime state: initial statuses, nothing solved, empty hint state
/// for every question.
pub fn create_quiz_state(config: &QuizConfig) -> QuizState {
    let quiz = &config.quiz;
    let statuses = initial_statuses(quiz.questions.len(), config.initial_unlocked_questions);

    let questions = quiz
        .questions
        .iter()
        .cloned()
        .zip(statuses)
        .map(|(question, status)| QuestionState { question, status })
        .collect();
    let hint_states: BTreeMap<_, _> = quiz.questions.iter().map(|q| (q.id, HintState::new(q.id))).collect();

    debug!(
        target: "rateviech",
        quiz_id = %quiz.id,
        questions = quiz.questions.len(),
        "created quiz state"
    );

    QuizState {
        id: quiz.id.clone(),
        title: quiz.title.clone(),
        questions,
        completed_questions: 0,
        hint_states,
    }
}
