//! Revealing a hint as a pure transition over quiz state and wallet.

use serde::Serialize;

use super::{
    content::resolve_content,
    eligibility::can_use,
    model::{HintDenial, UsedHint},
};
use crate::{
    error::{EngineError, EngineResult},
    points::{TxContext, UserPoints},
    quiz::QuizState,
    types::{HintId, Points, QuestionId},
};

/// Result of a hint request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum HintOutcome {
    /// The hint was revealed.
    Applied {
        /// Hint id.
        hint_id: HintId,
        /// Resolved text.
        content: String,
        /// Points taken from the wallet; 0 for free hints.
        points_deducted: Points,
    },
    /// The hint could not be used.
    Denied(HintDenial),
}

impl HintOutcome {
    /// True for `Applied`.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Outcome plus the states to swap in when the hint was applied.
#[derive(Debug, Clone)]
pub struct HintTransition {
    /// What happened.
    pub outcome: HintOutcome,
    /// Replacement quiz state and wallet; `None` when denied.
    pub next: Option<(QuizState, UserPoints)>,
}

/// Ledger reason of a hint purchase.
pub fn purchase_reason(title: &str) -> String {
    format!("Hint verwendet: {title}")
}

/// Reveal `hint_id` on `question_id` of `quiz`.
///
/// Unknown question, hint or missing hint state are contract violations and
/// fail. Ineligible hints come back as [`HintOutcome::Denied`] with the inputs
/// untouched. Auto-free hints are recorded as used and consumed; purchasable
/// hints are recorded as used and debited from the wallet.
pub fn apply_hint(
    quiz: &QuizState,
    points: &UserPoints,
    question_id: QuestionId,
    hint_id: &str,
    ts_ms: u64,
) -> EngineResult<HintTransition> {
    let question = &quiz.question(question_id)?.question;
    let hint = question.hint(hint_id).ok_or_else(|| EngineError::UnknownHint {
        question_id,
        hint_id: hint_id.to_string(),
    })?;
    let state = quiz.hint_state(question_id)?;

    if let Err(denial) = can_use(hint, state, points) {
        return Ok(HintTransition {
            outcome: HintOutcome::Denied(denial),
            next: None,
        });
    }

    let content = resolve_content(hint, question);
    let mut next_state = state.clone();
    next_state.used_hints.push(UsedHint {
        id: hint.id.clone(),
        title: hint.title.clone(),
        content: content.clone(),
    });

    let (next_points, deducted) = if hint.is_auto_free() {
        next_state.auto_free_hints_used.insert(hint.id.clone());
        (points.clone(), 0)
    } else {
        let cost = hint.cost();
        let ctx = TxContext::hint(&quiz.id, question_id, &hint.id);
        let Some(debited) = points.debit(cost, &purchase_reason(&hint.title), ctx, ts_ms) else {
            return Ok(HintTransition {
                outcome: HintOutcome::Denied(HintDenial::InsufficientPoints {
                    required: cost,
                    available: points.total_points,
                }),
                next: None,
            });
        };
        (debited, cost)
    };

    let mut next_quiz = quiz.clone();
    next_quiz.hint_states.insert(question_id, next_state);

    Ok(HintTransition {
        outcome: HintOutcome::Applied {
            hint_id: hint.id.clone(),
            content,
            points_deducted: deducted,
        },
        next: Some((next_quiz, next_points)),
    })
}
