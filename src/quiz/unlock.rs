//! Quiz unlock evaluation.
//!
//! A locked quiz opens once the quiz named by its [`UnlockCondition`] has
//! enough recorded progress. Unknown quiz ids fail closed.

use serde::Serialize;

use super::{
    model::{QuizConfig, QuizStates, UnlockCondition},
    registry::Registry,
    stats::{completion_percentage, is_completed},
};
use crate::core::snapshot::PendingUnlock;

/// Evaluation of one condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionStatus {
    /// Condition satisfied.
    pub is_met: bool,
    /// 0 to 100.
    pub progress: u8,
}

impl ConditionStatus {
    const CLOSED: Self = Self {
        is_met: false,
        progress: 0,
    };
    const OPEN: Self = Self {
        is_met: true,
        progress: 100,
    };
}

/// Evaluate `condition` against the recorded quiz states.
///
/// `Playthrough` is binary. `Progress` reports the share of required
/// questions solved, capped at 100. A required quiz without questions is
/// vacuously complete, and a requirement of zero questions is always met.
pub fn check_condition(condition: &UnlockCondition, states: &QuizStates) -> ConditionStatus {
    let Some(required) = states.get(condition.required_quiz_id()) else {
        return ConditionStatus::CLOSED;
    };

    match condition {
        UnlockCondition::Playthrough { .. } => {
            if is_completed(required) {
                ConditionStatus::OPEN
            } else {
                ConditionStatus::CLOSED
            }
        }
        UnlockCondition::Progress {
            required_questions_solved,
            ..
        } => {
            if required.questions.is_empty() || required.completed_questions >= *required_questions_solved {
                ConditionStatus::OPEN
            } else {
                ConditionStatus {
                    is_met: false,
                    progress: completion_percentage(*required_questions_solved, required.completed_questions),
                }
            }
        }
    }
}

/// True when the quiz is playable: not locked, locked without condition, or
/// condition met.
pub fn is_unlocked(config: &QuizConfig, states: &QuizStates) -> bool {
    match (&config.unlock_condition, config.initially_locked) {
        (Some(condition), true) => check_condition(condition, states).is_met,
        _ => true,
    }
}

/// Unlock status of a quiz as shown on its card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockProgress {
    /// The gating condition; `None` for open quizzes.
    pub condition: Option<UnlockCondition>,
    /// 0 to 100.
    pub progress: u8,
    /// Condition satisfied.
    pub is_met: bool,
}

/// Unlock status of `config`; open quizzes report `{None, 100, true}`.
pub fn unlock_progress(config: &QuizConfig, states: &QuizStates) -> UnlockProgress {
    match (&config.unlock_condition, config.initially_locked) {
        (Some(condition), true) => {
            let status = check_condition(condition, states);
            UnlockProgress {
                condition: Some(condition.clone()),
                progress: status.progress,
                is_met: status.is_met,
            }
        }
        _ => UnlockProgress {
            condition: None,
            progress: 100,
            is_met: true,
        },
    }
}

/// Locked quizzes that just became playable.
///
/// A quiz qualifies when its condition is met, its required quiz has a state
/// and it is not already among `pending`. Registry order.
pub fn newly_unlocked<'r>(
    registry: &'r Registry,
    states: &QuizStates,
    pending: &[PendingUnlock],
) -> Vec<&'r QuizConfig> {
    registry
        .iter()
        .filter(|config| {
            let Some(condition) = config.unlock_condition.as_ref().filter(|_| config.initially_locked) else {
                return false;
            };
            states.contains_key(condition.required_quiz_id())
                && check_condition(condition, states).is_met
                && !pending.iter().any(|p| p.quiz_id == config.id())
        })
        .collect()
}
