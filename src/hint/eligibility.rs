//! Whether a hint may be revealed right now.

use super::{
    content::resolve_content,
    model::{AvailableHint, Hint, HintDenial, HintKind},
};
use crate::{
    points::UserPoints,
    quiz::{HintState, Question},
};

/// Check a hint against the question's bookkeeping and the wallet.
///
/// Checks run in this order: already used, then the kind's own rule (attempt
/// threshold for auto-free, never for contextual), then the price.
pub fn can_use(hint: &Hint, state: &HintState, points: &UserPoints) -> Result<(), HintDenial> {
    if state.has_used(&hint.id) {
        return Err(HintDenial::AlreadyUsed);
    }

    match &hint.kind {
        HintKind::AutoFree {
            trigger_after_attempts,
            ..
        } => {
            if state.auto_free_hints_used.contains(&hint.id) {
                Err(HintDenial::AlreadyUsed)
            } else if state.wrong_attempts < *trigger_after_attempts {
                Err(HintDenial::NotYetTriggered {
                    required: *trigger_after_attempts,
                    wrong_attempts: state.wrong_attempts,
                })
            } else {
                Ok(())
            }
        }
        HintKind::Contextual { .. } => Err(HintDenial::TriggeredOnly),
        HintKind::Static { cost, .. } | HintKind::Dynamic { cost, .. } => {
            if points.total_points < *cost {
                Err(HintDenial::InsufficientPoints {
                    required: *cost,
                    available: points.total_points,
                })
            } else {
                Ok(())
            }
        }
    }
}

/// Every hint of `question` with its current eligibility.
///
/// Content is resolved only for usable hints so that nothing leaks before
/// the hint is paid for.
pub fn available_hints(question: &Question, state: &HintState, points: &UserPoints) -> Vec<AvailableHint> {
    question
        .hints
        .iter()
        .map(|hint| {
            let denial = can_use(hint, state, points).err();
            AvailableHint {
                hint: hint.clone(),
                content: denial.is_none().then(|| resolve_content(hint, question)),
                denial,
            }
        })
        .collect()
}
