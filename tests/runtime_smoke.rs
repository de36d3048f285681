mod common;

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use rateviech::{
    EngineError,
    config::EngineConfig,
    core::{session::GameSession, snapshot::GameSnapshot},
    hint::HintOutcome,
    persist::{PersistResult, SnapshotStore, sqlite::SqliteSnapshotStore},
    runtime::{
        events::GameEvent,
        handle::{RuntimeConfig, RuntimeError, spawn_session},
    },
};
use tempfile::TempDir;
use tokio::sync::broadcast;

struct RecordingStore {
    saved: Arc<Mutex<Vec<GameSnapshot>>>,
}

impl SnapshotStore for RecordingStore {
    fn load(&self) -> PersistResult<Option<GameSnapshot>> {
        Ok(self.saved.lock().expect("lock").last().cloned())
    }

    fn save(&mut self, snapshot: &GameSnapshot) -> PersistResult<()> {
        self.saved.lock().expect("lock").push(snapshot.clone());
        Ok(())
    }
}

async fn next_events(sub: &mut broadcast::Receiver<GameEvent>, n: usize) -> Vec<GameEvent> {
    let mut seen = Vec::with_capacity(n);
    for _ in 0..n {
        let evt = tokio::time::timeout(Duration::from_secs(1), sub.recv())
            .await
            .expect("event")
            .expect("recv");
        seen.push(evt);
    }
    seen
}

#[tokio::test]
async fn runtime_answers_hints_and_events_ordered() {
    let handle = spawn_session(common::session(), None, RuntimeConfig::default());
    let mut sub = handle.subscribe();

    let outcome = handle.submit_answer("wald", 1, "Reh").await.expect("answer");
    assert!(outcome.correct);
    let applied = handle.apply_hint("wald", 2, "2_letter_count").await.expect("hint");
    assert!(matches!(applied, HintOutcome::Applied { points_deducted: 5, .. }));

    let seen = next_events(&mut sub, 4).await;
    assert_eq!(
        seen,
        vec![
            GameEvent::AnswerChecked {
                quiz_id: "wald".to_string(),
                question_id: 1,
                correct: true,
            },
            GameEvent::PointsChanged { total_points: 60 },
            GameEvent::HintApplied {
                quiz_id: "wald".to_string(),
                question_id: 2,
                hint_id: "2_letter_count".to_string(),
                points_deducted: 5,
            },
            GameEvent::PointsChanged { total_points: 55 },
        ]
    );

    let snapshot = handle.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.user_points.total_points, 55);
    let hints = handle.available_hints("wald", 2).await.expect("hints");
    let usable: Vec<&str> = hints.iter().filter(|h| h.can_use()).map(|h| h.hint.id.as_str()).collect();
    assert_eq!(usable, vec!["2_first_letter"]);
    assert_eq!(handle.next_question_id("wald", Some(2)).await.expect("next"), Some(3));

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn runtime_reports_unlocks_and_engine_errors() {
    let handle = spawn_session(common::session(), None, RuntimeConfig::default());
    let mut sub = handle.subscribe();

    for (id, answer) in [(1, "Reh"), (2, "Fuchs"), (3, "Dachs")] {
        handle.submit_answer("wald", id, answer).await.expect("answer");
    }
    let seen = next_events(&mut sub, 7).await;
    assert_eq!(
        seen.last(),
        Some(&GameEvent::QuizUnlocked {
            quiz_id: "dschungel".to_string(),
            quiz_title: "Dschungeltiere".to_string(),
        })
    );
    let progress = handle.unlock_progress("dschungel").await.expect("progress");
    assert!(progress.is_met);
    assert!(handle.mark_unlock_shown("dschungel").await.expect("mark"));
    assert!(handle.detect_missed_unlocks().await.expect("detect").is_empty());

    let err = handle.submit_answer("zoo", 1, "Reh").await.unwrap_err();
    assert!(matches!(err, RuntimeError::Engine(EngineError::UnknownQuiz(_))));

    handle.reset_all().await.expect("reset");
    let seen = next_events(&mut sub, 2).await;
    assert_eq!(
        seen,
        vec![GameEvent::AllReset, GameEvent::PointsChanged { total_points: 50 }]
    );

    handle.shutdown().await.expect("shutdown");
    assert!(matches!(
        handle.snapshot().await,
        Err(RuntimeError::ChannelClosed)
    ));
}

#[tokio::test]
async fn runtime_checkpoints_periodically_on_request_and_on_shutdown() {
    let saved = Arc::new(Mutex::new(Vec::new()));
    let store = RecordingStore {
        saved: Arc::clone(&saved),
    };
    let cfg = RuntimeConfig {
        checkpoint_every_ops: 2,
        ..RuntimeConfig::default()
    };
    let handle = spawn_session(common::session(), Some(Box::new(store)), cfg);
    let mut sub = handle.subscribe();

    handle.submit_answer("wald", 1, "Hase").await.expect("wrong");
    assert!(saved.lock().expect("lock").is_empty());
    handle.submit_answer("wald", 1, "Reh").await.expect("right");
    assert_eq!(saved.lock().expect("lock").len(), 1);

    let seen = next_events(&mut sub, 4).await;
    assert!(matches!(seen[3], GameEvent::Checkpointed { .. }));

    handle.reset_quiz("wald").await.expect("reset");
    handle.checkpoint().await.expect("checkpoint");
    assert_eq!(saved.lock().expect("lock").len(), 2);

    handle.shutdown().await.expect("shutdown");
    let saved = saved.lock().expect("lock");
    assert_eq!(saved.len(), 3);
    let last = saved.last().expect("last");
    assert_eq!(last.user_points.total_points, 60);
    assert_eq!(last.quiz_states["wald"].completed_questions, 0);
}

#[tokio::test]
async fn runtime_state_survives_a_restart_through_sqlite() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("game.db");

    let store = SqliteSnapshotStore::open(&db_path).expect("open sqlite");
    let handle = spawn_session(common::session(), Some(Box::new(store)), RuntimeConfig::default());
    handle.submit_answer("dschungel", 1, "Leopard").await.expect("answer");
    handle.shutdown().await.expect("shutdown");

    let store = SqliteSnapshotStore::open(&db_path).expect("reopen sqlite");
    let saved = store.load().expect("load");
    let config = EngineConfig::default();
    let session = GameSession::restore(common::registry(&config), config, saved);
    assert_eq!(session.points().total_points, 66);

    let handle = spawn_session(session, Some(Box::new(store)), RuntimeConfig::default());
    let outcome = handle.submit_answer("dschungel", 1, "Leopard").await.expect("answer");
    assert!(outcome.already_solved);
    handle.shutdown().await.expect("shutdown");
}
