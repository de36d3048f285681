//! Question progression: solving, activating the next question, navigation.

use super::model::{QuestionState, QuizState};
use crate::{
    error::{EngineError, EngineResult},
    text::is_correct,
    types::{QuestionId, QuestionStatus},
};

/// Index of the first `Inactive` question.
pub fn next_inactive_index(questions: &[QuestionState]) -> Option<usize> {
    questions.iter().position(|q| q.status == QuestionStatus::Inactive)
}

/// Mark `answered` as solved and activate the first inactive question.
///
/// An out-of-range index returns the questions unchanged. At most one
/// question moves from `Inactive` to `Active` per call.
pub fn apply_correct_answer(questions: &[QuestionState], answered: usize) -> Vec<QuestionState> {
    let mut next = questions.to_vec();
    let Some(target) = next.get_mut(answered) else {
        return next;
    };
    target.status = QuestionStatus::Solved;

    if let Some(i) = next_inactive_index(&next) {
        next[i].status = QuestionStatus::Active;
    }
    next
}

/// Result of [`answer_question`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    /// Whether the answer was accepted.
    pub is_correct: bool,
    /// State after the answer; equal to the input when incorrect.
    pub state: QuizState,
}

/// Judge `text` for `question_id` and advance the quiz on success.
///
/// Fails with [`crate::EngineError::UnknownQuestion`] when the quiz has no
/// such question. A correct answer to an already solved question leaves the
/// state as it is.
pub fn answer_question(state: &QuizState, question_id: QuestionId, text: &str) -> EngineResult<AnswerResult> {
    let index = state
        .question_index(question_id)
        .ok_or_else(|| EngineError::UnknownQuestion {
            quiz_id: state.id.clone(),
            question_id,
        })?;
    let question = &state.questions[index].question;
    let correct = is_correct(text, &question.answer, &question.alternative_answers);
    // a solved question is never counted twice
    if !correct || state.questions[index].status.is_solved() {
        return Ok(AnswerResult {
            is_correct: correct,
            state: state.clone(),
        });
    }

    let mut next = state.clone();
    next.questions = apply_correct_answer(&state.questions, index);
    next.completed_questions += 1;
    Ok(AnswerResult {
        is_correct: true,
        state: next,
    })
}

/// Question to show next.
///
/// Questions are ordered by id. With a known `current` id the search goes
/// forward from it, then backward; otherwise (or when both fail) the first
/// unsolved question is returned. `None` when everything is solved.
pub fn next_active_question_id(state: &QuizState, current: Option<QuestionId>) -> Option<QuestionId> {
    let mut sorted: Vec<&QuestionState> = state.questions.iter().collect();
    sorted.sort_by_key(|q| q.id());
    let unsolved = |q: &&QuestionState| !q.status.is_solved();

    if let Some(pos) = current.and_then(|id| sorted.iter().position(|q| q.id() == id)) {
        let forward = sorted[pos + 1..].iter().find(|q| unsolved(q));
        let backward = || sorted[..pos].iter().rev().find(|q| unsolved(q));
        if let Some(q) = forward.or_else(backward) {
            return Some(q.id());
        }
    }
    sorted.iter().find(|q| unsolved(q)).map(|q| q.id())
}
