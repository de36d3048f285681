use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, broadcast, mpsc, oneshot};
use tracing::{info, warn};

use crate::{
    core::{
        now_ms,
        session::{AnswerOutcome, GameSession},
        snapshot::{GameSnapshot, PendingUnlock},
    },
    error::EngineError,
    hint::{AvailableHint, HintOutcome},
    persist::{PersistError, SnapshotStore},
    quiz::unlock::UnlockProgress,
    types::{QuestionId, QuizId},
};

use super::events::GameEvent;

/// Failure of a runtime request.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The engine rejected the request.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// Saving the snapshot failed.
    #[error(transparent)]
    Persist(#[from] PersistError),
    /// The runtime loop is gone.
    #[error("runtime channel closed")]
    ChannelClosed,
}

/// Tuning of the runtime loop.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Pending commands before senders wait.
    pub command_queue_bound: usize,
    /// Events buffered per subscriber.
    pub event_buffer: usize,
    /// Save after this many state changes; 0 saves only on request and
    /// shutdown.
    pub checkpoint_every_ops: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_buffer: 1024,
            checkpoint_every_ops: 20,
        }
    }
}

type SharedStore = Arc<Mutex<Box<dyn SnapshotStore>>>;

/// Cloneable handle to a session owned by the runtime loop.
#[derive(Clone)]
pub struct SessionHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<GameEvent>,
}

enum Command {
    SubmitAnswer {
        quiz_id: QuizId,
        question_id: QuestionId,
        text: String,
        resp: oneshot::Sender<Result<AnswerOutcome, RuntimeError>>,
    },
    ApplyHint {
        quiz_id: QuizId,
        question_id: QuestionId,
        hint_id: String,
        resp: oneshot::Sender<Result<HintOutcome, RuntimeError>>,
    },
    AvailableHints {
        quiz_id: QuizId,
        question_id: QuestionId,
        resp: oneshot::Sender<Result<Vec<AvailableHint>, RuntimeError>>,
    },
    NextQuestion {
        quiz_id: QuizId,
        current: Option<QuestionId>,
        resp: oneshot::Sender<Result<Option<QuestionId>, RuntimeError>>,
    },
    UnlockProgress {
        quiz_id: QuizId,
        resp: oneshot::Sender<Result<UnlockProgress, RuntimeError>>,
    },
    Snapshot {
        resp: oneshot::Sender<GameSnapshot>,
    },
    MarkUnlockShown {
        quiz_id: QuizId,
        resp: oneshot::Sender<bool>,
    },
    DetectMissedUnlocks {
        resp: oneshot::Sender<Vec<PendingUnlock>>,
    },
    ResetQuiz {
        quiz_id: QuizId,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    ResetAll {
        resp: oneshot::Sender<()>,
    },
    Checkpoint {
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    Shutdown {
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
}

/// Move `session` into a single-writer task and return its handle.
///
/// Commands run one at a time against the owned session. When a `store` is
/// given, snapshots are saved on request, every
/// [`RuntimeConfig::checkpoint_every_ops`] state changes, and on shutdown.
pub fn spawn_session(
    session: GameSession,
    store: Option<Box<dyn SnapshotStore>>,
    config: RuntimeConfig,
) -> SessionHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<GameEvent>(config.event_buffer.max(1));

    let events_tx_loop = events_tx.clone();
    let store: Option<SharedStore> = store.map(|s| Arc::new(Mutex::new(s)));

    tokio::spawn(async move {
        let mut session = session;
        let mut ops_since_checkpoint = 0usize;

        while let Some(cmd) = cmd_rx.recv().await {
            let done = handle_command(
                cmd,
                &mut session,
                store.as_ref(),
                &events_tx_loop,
                &config,
                &mut ops_since_checkpoint,
            )
            .await;
            if done {
                break;
            }
        }
    });

    SessionHandle { cmd_tx, events_tx }
}

impl SessionHandle {
    /// Subscribe to game events.
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events_tx.subscribe()
    }

    async fn call<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// See [`GameSession::submit_answer`].
    pub async fn submit_answer(
        &self,
        quiz_id: impl Into<QuizId>,
        question_id: QuestionId,
        text: impl Into<String>,
    ) -> Result<AnswerOutcome, RuntimeError> {
        let (quiz_id, text) = (quiz_id.into(), text.into());
        self.call(|resp| Command::SubmitAnswer {
            quiz_id,
            question_id,
            text,
            resp,
        })
        .await?
    }

    /// See [`GameSession::apply_hint`].
    pub async fn apply_hint(
        &self,
        quiz_id: impl Into<QuizId>,
        question_id: QuestionId,
        hint_id: impl Into<String>,
    ) -> Result<HintOutcome, RuntimeError> {
        let (quiz_id, hint_id) = (quiz_id.into(), hint_id.into());
        self.call(|resp| Command::ApplyHint {
            quiz_id,
            question_id,
            hint_id,
            resp,
        })
        .await?
    }

    /// See [`GameSession::available_hints`].
    pub async fn available_hints(
        &self,
        quiz_id: impl Into<QuizId>,
        question_id: QuestionId,
    ) -> Result<Vec<AvailableHint>, RuntimeError> {
        let quiz_id = quiz_id.into();
        self.call(|resp| Command::AvailableHints {
            quiz_id,
            question_id,
            resp,
        })
        .await?
    }

    /// See [`GameSession::next_question_id`].
    pub async fn next_question_id(
        &self,
        quiz_id: impl Into<QuizId>,
        current: Option<QuestionId>,
    ) -> Result<Option<QuestionId>, RuntimeError> {
        let quiz_id = quiz_id.into();
        self.call(|resp| Command::NextQuestion {
            quiz_id,
            current,
            resp,
        })
        .await?
    }

    /// See [`GameSession::unlock_progress`].
    pub async fn unlock_progress(&self, quiz_id: impl Into<QuizId>) -> Result<UnlockProgress, RuntimeError> {
        let quiz_id = quiz_id.into();
        self.call(|resp| Command::UnlockProgress { quiz_id, resp }).await?
    }

    /// Copy of the current snapshot.
    pub async fn snapshot(&self) -> Result<GameSnapshot, RuntimeError> {
        self.call(|resp| Command::Snapshot { resp }).await
    }

    /// See [`GameSession::mark_unlock_shown`].
    pub async fn mark_unlock_shown(&self, quiz_id: impl Into<QuizId>) -> Result<bool, RuntimeError> {
        let quiz_id = quiz_id.into();
        self.call(|resp| Command::MarkUnlockShown { quiz_id, resp }).await
    }

    /// See [`GameSession::detect_missed_unlocks`].
    pub async fn detect_missed_unlocks(&self) -> Result<Vec<PendingUnlock>, RuntimeError> {
        self.call(|resp| Command::DetectMissedUnlocks { resp }).await
    }

    /// See [`GameSession::reset_quiz`].
    pub async fn reset_quiz(&self, quiz_id: impl Into<QuizId>) -> Result<(), RuntimeError> {
        let quiz_id = quiz_id.into();
        self.call(|resp| Command::ResetQuiz { quiz_id, resp }).await?
    }

    /// See [`GameSession::reset_all`].
    pub async fn reset_all(&self) -> Result<(), RuntimeError> {
        self.call(|resp| Command::ResetAll { resp }).await
    }

    /// Save the current snapshot now.
    pub async fn checkpoint(&self) -> Result<(), RuntimeError> {
        self.call(|resp| Command::Checkpoint { resp }).await?
    }

    /// Save a final snapshot and stop the loop.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.call(|resp| Command::Shutdown { resp }).await?
    }
}

async fn handle_command(
    cmd: Command,
    session: &mut GameSession,
    store: Option<&SharedStore>,
    events_tx: &broadcast::Sender<GameEvent>,
    config: &RuntimeConfig,
    ops_since_checkpoint: &mut usize,
) -> bool {
    match cmd {
        Command::SubmitAnswer {
            quiz_id,
            question_id,
            text,
            resp,
        } => {
            let res = session.submit_answer(&quiz_id, question_id, &text);
            if let Ok(outcome) = &res {
                emit_answer_events(events_tx, session, &quiz_id, question_id, outcome);
                if !outcome.already_solved {
                    note_mutation(session, store, events_tx, config, ops_since_checkpoint).await;
                }
            }
            let _ = resp.send(res.map_err(RuntimeError::from));
        }
        Command::ApplyHint {
            quiz_id,
            question_id,
            hint_id,
            resp,
        } => {
            let res = session.apply_hint(&quiz_id, question_id, &hint_id);
            if let Ok(HintOutcome::Applied { points_deducted, .. }) = &res {
                let _ = events_tx.send(GameEvent::HintApplied {
                    quiz_id: quiz_id.clone(),
                    question_id,
                    hint_id: hint_id.clone(),
                    points_deducted: *points_deducted,
                });
                if *points_deducted > 0 {
                    let _ = events_tx.send(GameEvent::PointsChanged {
                        total_points: session.points().total_points,
                    });
                }
                note_mutation(session, store, events_tx, config, ops_since_checkpoint).await;
            }
            let _ = resp.send(res.map_err(RuntimeError::from));
        }
        Command::AvailableHints {
            quiz_id,
            question_id,
            resp,
        } => {
            let _ = resp.send(session.available_hints(&quiz_id, question_id).map_err(RuntimeError::from));
        }
        Command::NextQuestion {
            quiz_id,
            current,
            resp,
        } => {
            let _ = resp.send(session.next_question_id(&quiz_id, current).map_err(RuntimeError::from));
        }
        Command::UnlockProgress { quiz_id, resp } => {
            let _ = resp.send(session.unlock_progress(&quiz_id).map_err(RuntimeError::from));
        }
        Command::Snapshot { resp } => {
            let _ = resp.send(session.snapshot());
        }
        Command::MarkUnlockShown { quiz_id, resp } => {
            let marked = session.mark_unlock_shown(&quiz_id);
            if marked {
                note_mutation(session, store, events_tx, config, ops_since_checkpoint).await;
            }
            let _ = resp.send(marked);
        }
        Command::DetectMissedUnlocks { resp } => {
            let found = session.detect_missed_unlocks();
            for unlock in &found {
                let _ = events_tx.send(GameEvent::QuizUnlocked {
                    quiz_id: unlock.quiz_id.clone(),
                    quiz_title: unlock.quiz_title.clone(),
                });
            }
            if !found.is_empty() {
                note_mutation(session, store, events_tx, config, ops_since_checkpoint).await;
            }
            let _ = resp.send(found);
        }
        Command::ResetQuiz { quiz_id, resp } => {
            let res = session.reset_quiz(&quiz_id);
            if res.is_ok() {
                let _ = events_tx.send(GameEvent::QuizReset { quiz_id });
                note_mutation(session, store, events_tx, config, ops_since_checkpoint).await;
            }
            let _ = resp.send(res.map_err(RuntimeError::from));
        }
        Command::ResetAll { resp } => {
            session.reset_all();
            let _ = events_tx.send(GameEvent::AllReset);
            let _ = events_tx.send(GameEvent::PointsChanged {
                total_points: session.points().total_points,
            });
            note_mutation(session, store, events_tx, config, ops_since_checkpoint).await;
            let _ = resp.send(());
        }
        Command::Checkpoint { resp } => {
            let res = checkpoint(session, store, events_tx).await;
            if res.is_ok() {
                *ops_since_checkpoint = 0;
            }
            let _ = resp.send(res);
        }
        Command::Shutdown { resp } => {
            let res = checkpoint(session, store, events_tx).await;
            info!(target: "rateviech", ok = res.is_ok(), "session runtime stopped");
            let _ = resp.send(res);
            return true;
        }
    }

    false
}

fn emit_answer_events(
    events_tx: &broadcast::Sender<GameEvent>,
    session: &GameSession,
    quiz_id: &str,
    question_id: QuestionId,
    outcome: &AnswerOutcome,
) {
    let _ = events_tx.send(GameEvent::AnswerChecked {
        quiz_id: quiz_id.to_string(),
        question_id,
        correct: outcome.correct,
    });
    if !outcome.correct || outcome.already_solved {
        return;
    }

    let _ = events_tx.send(GameEvent::PointsChanged {
        total_points: session.points().total_points,
    });
    if outcome.completed_quiz {
        let _ = events_tx.send(GameEvent::QuizCompleted {
            quiz_id: quiz_id.to_string(),
        });
    }
    for unlock in &outcome.unlocked_quizzes {
        let _ = events_tx.send(GameEvent::QuizUnlocked {
            quiz_id: unlock.quiz_id.clone(),
            quiz_title: unlock.quiz_title.clone(),
        });
    }
}

async fn checkpoint(
    session: &GameSession,
    store: Option<&SharedStore>,
    events_tx: &broadcast::Sender<GameEvent>,
) -> Result<(), RuntimeError> {
    let Some(store) = store else {
        return Ok(());
    };

    let snapshot = session.snapshot();
    let store_ref = Arc::clone(store);
    tokio::task::spawn_blocking(move || {
        let mut store = store_ref.blocking_lock();
        store.save(&snapshot)
    })
    .await
    .map_err(|e| PersistError::Message(format!("join error: {e}")))??;

    let ts_ms = now_ms();
    info!(target: "rateviech", ts_ms, "checkpoint saved");
    let _ = events_tx.send(GameEvent::Checkpointed { ts_ms });
    Ok(())
}

async fn note_mutation(
    session: &GameSession,
    store: Option<&SharedStore>,
    events_tx: &broadcast::Sender<GameEvent>,
    config: &RuntimeConfig,
    ops_since_checkpoint: &mut usize,
) {
    *ops_since_checkpoint += 1;
    if store.is_none() || config.checkpoint_every_ops == 0 || *ops_since_checkpoint < config.checkpoint_every_ops {
        return;
    }

    match checkpoint(session, store, events_tx).await {
        Ok(()) => *ops_since_checkpoint = 0,
        Err(err) => warn!(target: "rateviech", error = %err, "automatic checkpoint failed"),
    }
}
