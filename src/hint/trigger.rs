//! Hints fired by wrong answers.

use serde::Serialize;
use tracing::debug;

use super::model::{Hint, HintKind};
use crate::{
    quiz::{HintState, Question},
    text::normalize,
};

/// Free hints fired by one wrong answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HintTriggerResult {
    /// Contextual hints whose triggers appear in the answer.
    pub contextual: Vec<Hint>,
    /// Auto-free hints whose attempt threshold is reached.
    pub auto_free: Vec<Hint>,
}

impl HintTriggerResult {
    /// True when nothing fired.
    pub fn is_empty(&self) -> bool {
        self.contextual.is_empty() && self.auto_free.is_empty()
    }
}

/// Contextual hints of `question` whose triggers occur in `user_answer`.
///
/// Answer and triggers are compared as normalized slugs. Each hint appears at
/// most once, in declaration order. Contextual hints are never marked used,
/// so the same hint can fire again on a later answer.
pub fn check_contextual<'q>(user_answer: &str, question: &'q Question, _state: &HintState) -> Vec<&'q Hint> {
    let answer = normalize(user_answer);
    question
        .hints
        .iter()
        .filter(|hint| match &hint.kind {
            HintKind::Contextual { triggers, .. } => triggers.iter().any(|t| {
                let t = normalize(t);
                !t.is_empty() && answer.contains(&t)
            }),
            _ => false,
        })
        .collect()
}

/// Auto-free hints of `question` that are due and not yet consumed.
pub fn check_auto_free<'q>(question: &'q Question, state: &HintState) -> Vec<&'q Hint> {
    question
        .hints
        .iter()
        .filter(|hint| match &hint.kind {
            HintKind::AutoFree {
                trigger_after_attempts,
                ..
            } => {
                !state.auto_free_hints_used.contains(&hint.id)
                    && !state.has_used(&hint.id)
                    && state.wrong_attempts >= *trigger_after_attempts
            }
            _ => false,
        })
        .collect()
}

/// Both trigger checks at once.
pub fn check_triggered(user_answer: &str, question: &Question, state: &HintState) -> HintTriggerResult {
    let result = HintTriggerResult {
        contextual: check_contextual(user_answer, question, state).into_iter().cloned().collect(),
        auto_free: check_auto_free(question, state).into_iter().cloned().collect(),
    };
    debug!(
        target: "rateviech",
        question_id = question.id,
        wrong_attempts = state.wrong_attempts,
        contextual = result.contextual.len(),
        auto_free = result.auto_free.len(),
        "checked hint triggers"
    );
    result
}
