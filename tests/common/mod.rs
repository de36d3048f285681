#![allow(dead_code)]

use std::sync::Once;

use rateviech::{
    config::EngineConfig,
    core::session::GameSession,
    hint::factory::{auto_free_hint, contextual_hint, custom_hint, first_letter_hint, letter_count_hint},
    quiz::{
        Question, Quiz, Registry,
        factory::{QuizOptions, playthrough_condition, progress_condition, quiz_config},
    },
};

static TRACING: Once = Once::new();

/// Install a subscriber once per test binary; filter via `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn question(id: u32, answer: &str) -> Question {
    Question {
        id,
        answer: answer.to_string(),
        alternative_answers: vec![],
        hints: vec![],
    }
}

/// Five open forest questions; the second carries both paid generators.
pub fn wald() -> Quiz {
    let mut fuchs = question(2, "Fuchs");
    fuchs.hints = vec![letter_count_hint(2), first_letter_hint(2)];
    let mut eichhoernchen = question(4, "Eichhörnchen");
    eichhoernchen.alternative_answers = vec!["Eichkätzchen".to_string()];

    Quiz {
        id: "wald".to_string(),
        title: "Waldtiere".to_string(),
        questions: vec![
            question(1, "Reh"),
            fuchs,
            question(3, "Dachs"),
            eichhoernchen,
            question(5, "Wildschwein"),
        ],
    }
}

/// Unlocked by solving three `wald` questions.
pub fn dschungel() -> Quiz {
    let mut leopard = question(1, "Leopard");
    leopard.hints = vec![
        contextual_hint(1, &["jaguar"], "Knapp! Der Jaguar lebt in Amerika.", None).expect("triggers"),
        auto_free_hint(1, "Er klettert gern auf Bäume.", 5, "Kleiner Tipp"),
        custom_hint(1, "Kontinent", "Lebt in Afrika und Asien.", 20),
    ];

    Quiz {
        id: "dschungel".to_string(),
        title: "Dschungeltiere".to_string(),
        questions: vec![leopard, question(2, "Tapir")],
    }
}

/// Unlocked by finishing `dschungel`.
pub fn meer() -> Quiz {
    Quiz {
        id: "meer".to_string(),
        title: "Meerestiere".to_string(),
        questions: vec![question(1, "Wal"), question(2, "Robbe")],
    }
}

pub fn registry(config: &EngineConfig) -> Registry {
    let dschungel_opts = QuizOptions {
        order: Some(2),
        ..QuizOptions::locked_behind(progress_condition("wald", 3, None))
    };
    let meer_opts = QuizOptions {
        order: Some(3),
        ..QuizOptions::locked_behind(playthrough_condition("dschungel", None))
    };

    Registry::new(vec![
        quiz_config(meer(), meer_opts, config),
        quiz_config(wald(), QuizOptions::default(), config),
        quiz_config(dschungel(), dschungel_opts, config),
    ])
    .expect("registry")
}

pub fn session() -> GameSession {
    init_tracing();
    let config = EngineConfig::default();
    GameSession::new(registry(&config), config)
}
