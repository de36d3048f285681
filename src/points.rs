//! Process-wide points wallet and its append-only ledger.
//!
//! Every change goes through a [`PointTransaction`]; the totals are kept in
//! step so that `total_points == earned_points - spent_points` always holds.

use serde::{Deserialize, Serialize};

use crate::{
    config::EngineConfig,
    quiz::Question,
    types::{HintId, Points, QuestionId, QuizId, TxId},
};

/// Ledger reason of the starting balance.
pub const REASON_STARTING_BALANCE: &str = "Startguthaben";
/// Ledger reason of a correct answer.
pub const REASON_CORRECT_ANSWER: &str = "Frage korrekt beantwortet";

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Credit.
    Earned,
    /// Debit.
    Spent,
}

/// Quiz context attached to a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxContext {
    /// Quiz the points relate to.
    pub quiz_id: Option<QuizId>,
    /// Question the points relate to.
    pub question_id: Option<QuestionId>,
    /// Hint that was bought.
    pub hint_id: Option<HintId>,
}

impl TxContext {
    /// Context of a question.
    pub fn question(quiz_id: &str, question_id: QuestionId) -> Self {
        Self {
            quiz_id: Some(quiz_id.to_string()),
            question_id: Some(question_id),
            hint_id: None,
        }
    }

    /// Context of a hint on a question.
    pub fn hint(quiz_id: &str, question_id: QuestionId, hint_id: &str) -> Self {
        Self {
            hint_id: Some(hint_id.to_string()),
            ..Self::question(quiz_id, question_id)
        }
    }
}

/// One ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointTransaction {
    /// Monotonic within one wallet.
    pub id: TxId,
    /// Credit or debit.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Always positive; the direction is in `kind`.
    pub amount: Points,
    /// Human readable reason.
    pub reason: String,
    /// Unix milliseconds.
    pub timestamp: u64,
    /// Related quiz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_id: Option<QuizId>,
    /// Related question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<QuestionId>,
    /// Related hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_id: Option<HintId>,
}

/// The wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPoints {
    /// Current balance.
    pub total_points: Points,
    /// Sum of all credits.
    pub earned_points: Points,
    /// Sum of all debits.
    pub spent_points: Points,
    /// Ledger, oldest first.
    #[serde(default)]
    pub points_history: Vec<PointTransaction>,
}

impl UserPoints {
    /// Wallet holding `amount`, booked as a single starting-balance credit.
    pub fn with_starting_balance(amount: Points, ts_ms: u64) -> Self {
        let empty = Self {
            total_points: 0,
            earned_points: 0,
            spent_points: 0,
            points_history: Vec::new(),
        };
        empty.credit(amount, REASON_STARTING_BALANCE, TxContext::default(), ts_ms)
    }

    /// Wallet as configured for a new player.
    pub fn initial(config: &EngineConfig, ts_ms: u64) -> Self {
        Self::with_starting_balance(config.starting_points, ts_ms)
    }

    fn next_tx_id(&self) -> TxId {
        self.points_history.last().map_or(1, |tx| tx.id + 1)
    }

    fn record(&mut self, kind: TransactionKind, amount: Points, reason: &str, ctx: TxContext, ts_ms: u64) {
        let tx = PointTransaction {
            id: self.next_tx_id(),
            kind,
            amount,
            reason: reason.to_string(),
            timestamp: ts_ms,
            quiz_id: ctx.quiz_id,
            question_id: ctx.question_id,
            hint_id: ctx.hint_id,
        };
        self.points_history.push(tx);
    }

    /// New wallet with `amount` credited.
    pub fn credit(&self, amount: Points, reason: &str, ctx: TxContext, ts_ms: u64) -> Self {
        let mut next = self.clone();
        next.total_points += amount;
        next.earned_points += amount;
        next.record(TransactionKind::Earned, amount, reason, ctx, ts_ms);
        next
    }

    /// New wallet with `amount` debited, or `None` when the balance is short.
    pub fn debit(&self, amount: Points, reason: &str, ctx: TxContext, ts_ms: u64) -> Option<Self> {
        let total_points = self.total_points.checked_sub(amount)?;
        let mut next = self.clone();
        next.total_points = total_points;
        next.spent_points += amount;
        next.record(TransactionKind::Spent, amount, reason, ctx, ts_ms);
        Some(next)
    }

    /// True when the totals agree with each other and with the ledger.
    pub fn is_consistent(&self) -> bool {
        let (earned, spent) = self
            .points_history
            .iter()
            .fold((0, 0), |(earned, spent), tx| match tx.kind {
                TransactionKind::Earned => (earned + tx.amount, spent),
                TransactionKind::Spent => (earned, spent + tx.amount),
            });
        earned == self.earned_points
            && spent == self.spent_points
            && self.earned_points.checked_sub(self.spent_points) == Some(self.total_points)
    }

    /// Wallet with the totals recomputed from the ledger.
    ///
    /// `None` when the ledger itself is unusable: the sums overflow, debits
    /// exceed credits or transaction ids are not strictly increasing.
    pub fn rebuilt_from_history(&self) -> Option<Self> {
        let ordered = self.points_history.windows(2).all(|w| w[0].id < w[1].id);
        if !ordered {
            return None;
        }

        let mut earned: Points = 0;
        let mut spent: Points = 0;
        for tx in &self.points_history {
            match tx.kind {
                TransactionKind::Earned => earned = earned.checked_add(tx.amount)?,
                TransactionKind::Spent => spent = spent.checked_add(tx.amount)?,
            }
        }
        Some(Self {
            total_points: earned.checked_sub(spent)?,
            earned_points: earned,
            spent_points: spent,
            points_history: self.points_history.clone(),
        })
    }
}

/// Reward for solving `question`: a base amount plus a bonus per declared hint.
///
/// Declared hints count, not used ones.
pub fn points_for_correct_answer(question: &Question, config: &EngineConfig) -> Points {
    config.base_points + config.points_per_hint * question.hints.len() as Points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hint::factory::{first_letter_hint, letter_count_hint};

    #[test]
    fn starting_balance_is_one_credit() {
        let wallet = UserPoints::initial(&EngineConfig::default(), 1_000);
        assert_eq!(wallet.total_points, 50);
        assert_eq!(wallet.earned_points, 50);
        assert_eq!(wallet.points_history.len(), 1);
        assert_eq!(wallet.points_history[0].reason, REASON_STARTING_BALANCE);
        assert!(wallet.is_consistent());
    }

    #[test]
    fn debit_is_rejected_not_clamped() {
        let wallet = UserPoints::with_starting_balance(10, 0);
        assert!(wallet.debit(11, "Hint", TxContext::default(), 1).is_none());

        let after = wallet.debit(10, "Hint", TxContext::hint("q", 1, "1_first_letter"), 1).unwrap();
        assert_eq!(after.total_points, 0);
        assert_eq!(after.spent_points, 10);
        assert_eq!(after.points_history[1].id, 2);
        assert_eq!(after.points_history[1].hint_id.as_deref(), Some("1_first_letter"));
        assert!(after.is_consistent());
        // the input wallet is untouched
        assert_eq!(wallet.total_points, 10);
    }

    #[test]
    fn totals_are_rebuilt_from_the_ledger() {
        let wallet = UserPoints::with_starting_balance(30, 0)
            .debit(10, "Hint", TxContext::default(), 1)
            .unwrap();
        let mut broken = wallet.clone();
        broken.total_points = 9_999;
        broken.earned_points = 0;
        assert!(!broken.is_consistent());

        let rebuilt = broken.rebuilt_from_history().unwrap();
        assert_eq!(rebuilt, wallet);
        assert!(rebuilt.is_consistent());
    }

    #[test]
    fn unusable_ledgers_are_not_rebuilt() {
        let wallet = UserPoints::with_starting_balance(5, 0);
        let mut overspent = wallet.clone();
        overspent.points_history.push(PointTransaction {
            id: 2,
            kind: TransactionKind::Spent,
            amount: 6,
            reason: "Hint".into(),
            timestamp: 1,
            quiz_id: None,
            question_id: None,
            hint_id: None,
        });
        assert_eq!(overspent.rebuilt_from_history(), None);

        let mut reordered = wallet.credit(1, "x", TxContext::default(), 1);
        reordered.points_history.swap(0, 1);
        assert_eq!(reordered.rebuilt_from_history(), None);
    }

    #[test]
    fn reward_counts_declared_hints() {
        let mut question = Question {
            id: 1,
            answer: "Luchs".into(),
            alternative_answers: Vec::new(),
            hints: vec![letter_count_hint(1), first_letter_hint(1)],
        };
        let cfg = EngineConfig::default();
        assert_eq!(points_for_correct_answer(&question, &cfg), 14);
        question.hints.push(letter_count_hint(2));
        assert_eq!(points_for_correct_answer(&question, &cfg), 16);
        question.hints.clear();
        assert_eq!(points_for_correct_answer(&question, &cfg), 10);
    }
}
