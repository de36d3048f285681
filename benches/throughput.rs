use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use rateviech::{
    config::EngineConfig,
    core::session::GameSession,
    quiz::{
        Question, Quiz, Registry,
        factory::{QuizOptions, quiz_config},
    },
    text::{encode, is_correct},
};

const ANIMALS: [&str; 12] = [
    "Eichhörnchen",
    "Wildschwein",
    "Schneeeule",
    "Feuersalamander",
    "Rotkehlchen",
    "Dachs",
    "Luchs",
    "Gämse",
    "Steinbock",
    "Fischotter",
    "Weißstorch",
    "Roter Panda",
];

fn bench_encode(c: &mut Criterion) {
    c.bench_function("encode_12_names", |b| {
        b.iter(|| {
            for name in ANIMALS {
                black_box(encode(black_box(name)));
            }
        });
    });
}

fn bench_is_correct(c: &mut Criterion) {
    let alternates: Vec<String> = ANIMALS.iter().map(|s| (*s).to_string()).collect();
    let mut group = c.benchmark_group("is_correct");

    for (label, answer) in [("exact", "eichhoernchen"), ("phonetic", "Aichhörnchen"), ("miss", "Marder")] {
        group.bench_with_input(BenchmarkId::from_parameter(label), &answer, |b, answer| {
            b.iter(|| is_correct(black_box(answer), "Eichhörnchen", &alternates));
        });
    }

    group.finish();
}

fn bench_session_playthrough(c: &mut Criterion) {
    let config = EngineConfig::default();
    let questions: Vec<Question> = (0..1_000u32)
        .map(|i| Question {
            id: i + 1,
            answer: ANIMALS[i as usize % ANIMALS.len()].to_string(),
            alternative_answers: vec![],
            hints: vec![],
        })
        .collect();
    let quiz = Quiz {
        id: "gross".to_string(),
        title: "Großes Quiz".to_string(),
        questions,
    };
    let registry = Registry::new(vec![quiz_config(quiz, QuizOptions::default(), &config)]).expect("registry");

    c.bench_function("session_solve_1k", |b| {
        b.iter(|| {
            let mut session = GameSession::new(registry.clone(), config.clone());
            for i in 0..1_000u32 {
                let answer = ANIMALS[i as usize % ANIMALS.len()];
                let _ = session.submit_answer("gross", i + 1, answer).expect("answer");
            }
        });
    });
}

criterion_group!(benches, bench_encode, bench_is_correct, bench_session_playthrough);
criterion_main!(benches);
