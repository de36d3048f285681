//! Catalog-wide progress figures.

use super::model::{QuizState, QuizStates};

/// Quizzes with a state.
pub fn count_total_quizzes(states: &QuizStates) -> usize {
    states.len()
}

/// Quizzes whose questions are all solved. Empty quizzes count as completed.
pub fn count_completed_quizzes(states: &QuizStates) -> usize {
    states.values().filter(|s| is_completed(s)).count()
}

/// Questions over all quizzes.
pub fn count_total_questions(states: &QuizStates) -> usize {
    states.values().map(|s| s.questions.len()).sum()
}

/// Solved questions over all quizzes.
pub fn count_completed_questions(states: &QuizStates) -> usize {
    states.values().map(|s| s.completed_questions).sum()
}

/// `round(100 * completed / total)`, 0 when `total` is 0.
pub fn completion_percentage(total: usize, completed: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (completed as f64 / total as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Every question solved.
pub fn is_completed(state: &QuizState) -> bool {
    state.completed_questions == state.questions.len()
}

/// Percentage of solved questions, 0 for an empty quiz.
pub fn quiz_progress(state: &QuizState) -> u8 {
    completion_percentage(state.questions.len(), state.completed_questions)
}

/// `"solved/total"`, `None` for an empty quiz.
pub fn progress_label(state: &QuizState) -> Option<String> {
    (!state.questions.is_empty()).then(|| format!("{}/{}", state.completed_questions, state.questions.len()))
}
