//! `GameSession`: the owned context that ties catalog, config and snapshot
//! together.
//!
//! Every mutating call computes the next [`GameSnapshot`] from the current one
//! and swaps it in with a single assignment, so readers never observe a
//! half-applied transition.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::{
    now_ms,
    snapshot::{GameSnapshot, PendingUnlock},
};
use crate::{
    config::EngineConfig,
    error::{EngineError, EngineResult},
    hint::{self, AvailableHint, HintOutcome, HintTriggerResult, UsedHint, check_triggered},
    points::{REASON_CORRECT_ANSWER, TxContext, UserPoints, points_for_correct_answer},
    quiz::{
        HintState, QuestionState, QuizConfig, QuizState, QuizStates, Registry,
        factory::create_quiz_state,
        progression::{answer_question, next_active_question_id},
        stats::{self, is_completed},
        unlock::{UnlockProgress, is_unlocked, newly_unlocked, unlock_progress},
    },
    text::is_correct,
    types::{Points, QuestionId},
};

/// Everything the presentation layer needs after an answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
    /// The answer was accepted.
    pub correct: bool,
    /// The question was solved before; nothing changed.
    pub already_solved: bool,
    /// Question to show next.
    pub next_question_id: Option<QuestionId>,
    /// This answer finished the quiz.
    pub completed_quiz: bool,
    /// Quizzes unlocked by this answer.
    pub unlocked_quizzes: Vec<PendingUnlock>,
    /// Free hints fired by a wrong answer.
    pub triggered: HintTriggerResult,
    /// Points credited for a correct answer.
    pub points_awarded: Points,
}

/// A game in progress.
#[derive(Debug, Clone)]
pub struct GameSession {
    registry: Registry,
    config: EngineConfig,
    snapshot: GameSnapshot,
}

impl GameSession {
    /// New game: fresh state for every quiz and a starting wallet.
    pub fn new(registry: Registry, config: EngineConfig) -> Self {
        let snapshot = GameSnapshot::fresh(&registry, &config, now_ms());
        Self {
            registry,
            config,
            snapshot,
        }
    }

    /// Resume from a persisted snapshot.
    ///
    /// Without snapshot this is [`GameSession::new`]. Quizzes missing from the
    /// snapshot, or whose question ids no longer match the catalog, start
    /// fresh. Entries for quizzes no longer in the catalog are dropped.
    /// Question content always comes from the catalog. A wallet whose totals
    /// disagree with its ledger is repaired.
    pub fn restore(registry: Registry, config: EngineConfig, snapshot: Option<GameSnapshot>) -> Self {
        let Some(mut saved) = snapshot else {
            return Self::new(registry, config);
        };

        let mut quiz_states = QuizStates::new();
        for cfg in registry.iter() {
            let restored = saved
                .quiz_states
                .remove(cfg.id())
                .and_then(|state| reconcile(cfg, state));
            let state = restored.unwrap_or_else(|| create_quiz_state(cfg));
            quiz_states.insert(cfg.quiz.id.clone(), state);
        }
        for dropped in saved.quiz_states.keys() {
            warn!(target: "rateviech", quiz_id = %dropped, "dropping state of quiz missing from catalog");
        }

        let pending_unlocks = saved
            .pending_unlocks
            .into_iter()
            .filter(|p| registry.get(&p.quiz_id).is_some())
            .collect();

        let user_points = repair_wallet(saved.user_points, &config);

        info!(target: "rateviech", quizzes = quiz_states.len(), "restored game session");
        Self {
            registry,
            config,
            snapshot: GameSnapshot {
                quiz_states,
                user_points,
                pending_unlocks,
            },
        }
    }

    /// Copy of the current state, for persistence.
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshot.clone()
    }

    /// The catalog.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Engine settings.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// State of every quiz.
    pub fn quiz_states(&self) -> &QuizStates {
        &self.snapshot.quiz_states
    }

    /// State of one quiz.
    pub fn quiz_state(&self, quiz_id: &str) -> EngineResult<&QuizState> {
        self.snapshot
            .quiz_states
            .get(quiz_id)
            .ok_or_else(|| EngineError::UnknownQuiz(quiz_id.to_string()))
    }

    /// Percentage of solved questions of a quiz, 0 for an empty quiz.
    pub fn quiz_progress(&self, quiz_id: &str) -> EngineResult<u8> {
        Ok(stats::quiz_progress(self.quiz_state(quiz_id)?))
    }

    /// `"solved/total"` of a quiz, `None` for an empty quiz.
    pub fn progress_label(&self, quiz_id: &str) -> EngineResult<Option<String>> {
        Ok(stats::progress_label(self.quiz_state(quiz_id)?))
    }

    /// The wallet.
    pub fn points(&self) -> &UserPoints {
        &self.snapshot.user_points
    }

    /// Recorded unlock announcements.
    pub fn pending_unlocks(&self) -> &[PendingUnlock] {
        &self.snapshot.pending_unlocks
    }

    /// Judge an answer and advance the game.
    ///
    /// A correct answer solves the question, credits points and may finish
    /// the quiz or unlock others. A wrong answer counts an attempt and reports
    /// the free hints it fired. Answers to solved questions are judged but
    /// change nothing.
    pub fn submit_answer(&mut self, quiz_id: &str, question_id: QuestionId, text: &str) -> EngineResult<AnswerOutcome> {
        let state = self.quiz_state(quiz_id)?;
        let current = state.question(question_id)?;

        if current.status.is_solved() {
            let q = &current.question;
            return Ok(AnswerOutcome {
                correct: is_correct(text, &q.answer, &q.alternative_answers),
                already_solved: true,
                next_question_id: next_active_question_id(state, Some(question_id)),
                ..AnswerOutcome::default()
            });
        }

        let result = answer_question(state, question_id, text)?;
        let ts = now_ms();
        let mut next = self.snapshot.clone();

        if !result.is_correct {
            let question = &current.question;
            let mut hint_state = state.hint_state(question_id)?.clone();
            hint_state.wrong_attempts += 1;
            let triggered = check_triggered(text, question, &hint_state);
            debug!(
                target: "rateviech",
                quiz_id,
                question_id,
                wrong_attempts = hint_state.wrong_attempts,
                "wrong answer"
            );

            let mut quiz = result.state;
            quiz.hint_states.insert(question_id, hint_state);
            next.quiz_states.insert(quiz_id.to_string(), quiz);
            self.snapshot = next;
            return Ok(AnswerOutcome {
                triggered,
                next_question_id: Some(question_id),
                ..AnswerOutcome::default()
            });
        }

        let quiz = result.state;
        let awarded = points_for_correct_answer(&current.question, &self.config);
        next.user_points = next.user_points.credit(
            awarded,
            REASON_CORRECT_ANSWER,
            TxContext::question(quiz_id, question_id),
            ts,
        );
        let completed_quiz = is_completed(&quiz);
        let next_question_id = next_active_question_id(&quiz, None);
        next.quiz_states.insert(quiz_id.to_string(), quiz);

        let unlocked = record_unlocks(&self.registry, &mut next, ts);
        info!(
            target: "rateviech",
            quiz_id,
            question_id,
            points = awarded,
            completed_quiz,
            unlocked = unlocked.len(),
            "question solved"
        );
        self.snapshot = next;

        Ok(AnswerOutcome {
            correct: true,
            already_solved: false,
            next_question_id,
            completed_quiz,
            unlocked_quizzes: unlocked,
            triggered: HintTriggerResult::default(),
            points_awarded: awarded,
        })
    }

    /// Reveal a hint.
    ///
    /// Unknown ids fail; ineligible hints return [`HintOutcome::Denied`].
    pub fn apply_hint(&mut self, quiz_id: &str, question_id: QuestionId, hint_id: &str) -> EngineResult<HintOutcome> {
        let state = self.quiz_state(quiz_id)?;
        let transition = hint::apply_hint(state, &self.snapshot.user_points, question_id, hint_id, now_ms())?;

        match (&transition.outcome, transition.next) {
            (HintOutcome::Applied { points_deducted, .. }, Some((quiz, points))) => {
                info!(target: "rateviech", quiz_id, question_id, hint_id, points = *points_deducted, "hint applied");
                let mut next = self.snapshot.clone();
                next.quiz_states.insert(quiz_id.to_string(), quiz);
                next.user_points = points;
                self.snapshot = next;
            }
            (outcome, _) => {
                debug!(target: "rateviech", quiz_id, question_id, hint_id, ?outcome, "hint denied");
            }
        }
        Ok(transition.outcome)
    }

    /// Hints of a question with their eligibility.
    pub fn available_hints(&self, quiz_id: &str, question_id: QuestionId) -> EngineResult<Vec<AvailableHint>> {
        let state = self.quiz_state(quiz_id)?;
        let question = &state.question(question_id)?.question;
        let hint_state = state.hint_state(question_id)?;
        Ok(hint::available_hints(question, hint_state, &self.snapshot.user_points))
    }

    /// Hints revealed on a question, in reveal order.
    pub fn used_hints(&self, quiz_id: &str, question_id: QuestionId) -> EngineResult<&[UsedHint]> {
        let state = self.quiz_state(quiz_id)?;
        state.question(question_id)?;
        Ok(&state.hint_state(question_id)?.used_hints)
    }

    /// Question to show after `current`.
    pub fn next_question_id(&self, quiz_id: &str, current: Option<QuestionId>) -> EngineResult<Option<QuestionId>> {
        Ok(next_active_question_id(self.quiz_state(quiz_id)?, current))
    }

    /// True when the quiz is playable.
    pub fn is_unlocked(&self, quiz_id: &str) -> EngineResult<bool> {
        let cfg = self.registry.require(quiz_id)?;
        Ok(is_unlocked(cfg, &self.snapshot.quiz_states))
    }

    /// Unlock status of a quiz.
    pub fn unlock_progress(&self, quiz_id: &str) -> EngineResult<UnlockProgress> {
        let cfg = self.registry.require(quiz_id)?;
        Ok(unlock_progress(cfg, &self.snapshot.quiz_states))
    }

    /// Record unlocks that are due but not yet recorded.
    pub fn check_for_unlocks(&mut self) -> Vec<PendingUnlock> {
        let mut next = self.snapshot.clone();
        let unlocked = record_unlocks(&self.registry, &mut next, now_ms());
        if !unlocked.is_empty() {
            self.snapshot = next;
        }
        unlocked
    }

    /// Mark the announcement of `quiz_id` as shown. False when none is recorded.
    pub fn mark_unlock_shown(&mut self, quiz_id: &str) -> bool {
        let Some(pos) = self.snapshot.pending_unlocks.iter().position(|p| p.quiz_id == quiz_id) else {
            return false;
        };
        let mut next = self.snapshot.clone();
        next.pending_unlocks[pos].shown = true;
        self.snapshot = next;
        true
    }

    /// Record unlocks for every locked quiz whose required quiz is fully
    /// solved. Recovers announcements lost with an older snapshot.
    pub fn detect_missed_unlocks(&mut self) -> Vec<PendingUnlock> {
        let ts = now_ms();
        let mut next = self.snapshot.clone();
        let mut found = Vec::new();

        for cfg in self.registry.iter() {
            let Some(cond) = cfg.unlock_condition.as_ref().filter(|_| cfg.initially_locked) else {
                continue;
            };
            let required_done = next.quiz_states.get(cond.required_quiz_id()).is_some_and(is_completed);
            if required_done && !next.has_pending_unlock(cfg.id()) {
                let unlock = pending_unlock(cfg, ts);
                next.pending_unlocks.push(unlock.clone());
                found.push(unlock);
            }
        }

        info!(target: "rateviech", found = found.len(), "checked for missed unlocks");
        if !found.is_empty() {
            self.snapshot = next;
        }
        found
    }

    /// Start a quiz over. Its hint history goes too; the wallet stays.
    pub fn reset_quiz(&mut self, quiz_id: &str) -> EngineResult<()> {
        let cfg = self.registry.require(quiz_id)?;
        let mut next = self.snapshot.clone();
        next.quiz_states.insert(quiz_id.to_string(), create_quiz_state(cfg));
        self.snapshot = next;
        info!(target: "rateviech", quiz_id, "quiz reset");
        Ok(())
    }

    /// Start the whole game over, wallet and unlock announcements included.
    pub fn reset_all(&mut self) {
        self.snapshot = GameSnapshot::fresh(&self.registry, &self.config, now_ms());
        info!(target: "rateviech", "game reset");
    }
}

fn pending_unlock(cfg: &QuizConfig, ts_ms: u64) -> PendingUnlock {
    PendingUnlock {
        quiz_id: cfg.quiz.id.clone(),
        quiz_title: cfg.quiz.title.clone(),
        unlocked_at_ms: ts_ms,
        shown: false,
    }
}

/// Append pending unlocks for every newly playable quiz and return them.
fn record_unlocks(registry: &Registry, snapshot: &mut GameSnapshot, ts_ms: u64) -> Vec<PendingUnlock> {
    let unlocked: Vec<PendingUnlock> = newly_unlocked(registry, &snapshot.quiz_states, &snapshot.pending_unlocks)
        .into_iter()
        .map(|cfg| pending_unlock(cfg, ts_ms))
        .collect();
    for unlock in &unlocked {
        info!(target: "rateviech", quiz_id = %unlock.quiz_id, "quiz unlocked");
    }
    snapshot.pending_unlocks.extend(unlocked.iter().cloned());
    unlocked
}

/// Keep a consistent wallet; otherwise rebuild the totals from the ledger,
/// or start a fresh wallet when the ledger is unusable.
fn repair_wallet(saved: UserPoints, config: &EngineConfig) -> UserPoints {
    if saved.is_consistent() {
        return saved;
    }
    match saved.rebuilt_from_history() {
        Some(rebuilt) => {
            warn!(
                target: "rateviech",
                saved = saved.total_points,
                rebuilt = rebuilt.total_points,
                "rebuilding wallet totals from ledger"
            );
            rebuilt
        }
        None => {
            warn!(target: "rateviech", saved = saved.total_points, "wallet ledger unusable, starting fresh wallet");
            UserPoints::initial(config, now_ms())
        }
    }
}

/// Merge a restored quiz state with its catalog entry.
///
/// `None` when the question ids differ. Content is taken from the catalog,
/// hint states are completed and the solved count is recomputed.
fn reconcile(cfg: &QuizConfig, saved: QuizState) -> Option<QuizState> {
    let catalog = &cfg.quiz.questions;
    let same_ids = saved.questions.len() == catalog.len()
        && saved.questions.iter().zip(catalog).all(|(s, c)| s.id() == c.id);
    if !same_ids {
        warn!(target: "rateviech", quiz_id = %cfg.quiz.id, "question ids changed, starting quiz fresh");
        return None;
    }

    let questions: Vec<QuestionState> = saved
        .questions
        .into_iter()
        .zip(catalog)
        .map(|(s, c)| QuestionState {
            question: c.clone(),
            status: s.status,
        })
        .collect();
    let completed_questions = questions.iter().filter(|q| q.status.is_solved()).count();
    if completed_questions != saved.completed_questions {
        warn!(
            target: "rateviech",
            quiz_id = %cfg.quiz.id,
            saved = saved.completed_questions,
            solved = completed_questions,
            "repairing solved count"
        );
    }

    let mut hint_states = saved.hint_states;
    hint_states.retain(|id, _| catalog.iter().any(|q| q.id == *id));
    for q in catalog {
        hint_states
            .entry(q.id)
            .or_insert_with(|| HintState::new(q.id));
    }

    Some(QuizState {
        id: cfg.quiz.id.clone(),
        title: cfg.quiz.title.clone(),
        questions,
        completed_questions,
        hint_states,
    })
}
