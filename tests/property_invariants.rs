mod common;

use proptest::prelude::*;

use rateviech::{
    core::snapshot::GameSnapshot,
    quiz::progression::next_active_question_id,
    text::{encode, is_correct, normalize},
};

#[derive(Debug, Clone)]
enum Action {
    Right { quiz: u8, question: u8 },
    Wrong { quiz: u8, question: u8 },
    Hint { quiz: u8, question: u8, hint: u8 },
    Reset { quiz: u8 },
}

const QUIZZES: [&str; 3] = ["wald", "dschungel", "meer"];

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u8..3, 1u8..6).prop_map(|(quiz, question)| Action::Right { quiz, question }),
        (0u8..3, 1u8..6).prop_map(|(quiz, question)| Action::Wrong { quiz, question }),
        (0u8..3, 1u8..3, 0u8..3).prop_map(|(quiz, question, hint)| Action::Hint { quiz, question, hint }),
        (0u8..3).prop_map(|quiz| Action::Reset { quiz }),
    ]
}

fn assert_code_shape(code: &str) {
    let digits: Vec<char> = code.chars().collect();
    assert!(digits.iter().all(|d| ('0'..='8').contains(d)), "bad digit in {code}");
    assert!(!digits.iter().skip(1).any(|d| *d == '0'), "inner zero in {code}");
    assert!(digits.windows(2).all(|w| w[0] != w[1]), "repeated digit in {code}");
}

proptest! {
    #[test]
    fn codes_have_no_repeats_and_no_inner_zeros(word in "\\PC{0,24}") {
        assert_code_shape(&encode(&word));
    }

    #[test]
    fn german_words_encode_deterministically(word in "[a-zA-ZäöüÄÖÜß ]{1,20}") {
        let code = encode(&word);
        assert_code_shape(&code);
        prop_assert_eq!(code, encode(&word));
    }

    #[test]
    fn normalize_is_idempotent_and_slug_shaped(text in "\\PC{0,40}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert!(once.chars().all(|c| matches!(c, 'a'..='z' | '0'..='9' | '-')));
        prop_assert!(!once.starts_with('-') && !once.ends_with('-'));
        prop_assert!(!once.contains("--"));
    }

    #[test]
    fn every_answer_matches_itself(text in "\\PC{1,30}") {
        prop_assert!(is_correct(&text, &text, &[]));
    }

    #[test]
    fn snapshots_survive_json_and_keep_navigation(actions in prop::collection::vec(action_strategy(), 1..60)) {
        let mut session = common::session();

        for action in actions {
            match action {
                Action::Right { quiz, question } => {
                    let quiz_id = QUIZZES[usize::from(quiz)];
                    let question_id = u32::from(question);
                    let answer = session
                        .quiz_state(quiz_id)
                        .ok()
                        .and_then(|s| s.question(question_id).ok())
                        .map(|q| q.question.answer.clone());
                    if let Some(answer) = answer {
                        session.submit_answer(quiz_id, question_id, &answer).expect("answer");
                    }
                }
                Action::Wrong { quiz, question } => {
                    let _ = session.submit_answer(QUIZZES[usize::from(quiz)], u32::from(question), "Zzzz");
                }
                Action::Hint { quiz, question, hint } => {
                    let quiz_id = QUIZZES[usize::from(quiz)];
                    let question_id = u32::from(question);
                    let hint_id = session
                        .quiz_state(quiz_id)
                        .ok()
                        .and_then(|s| s.question(question_id).ok())
                        .and_then(|q| q.question.hints.get(usize::from(hint)))
                        .map(|h| h.id.clone());
                    if let Some(hint_id) = hint_id {
                        session.apply_hint(quiz_id, question_id, &hint_id).expect("hint");
                    }
                }
                Action::Reset { quiz } => {
                    session.reset_quiz(QUIZZES[usize::from(quiz)]).expect("reset");
                }
            }
            prop_assert!(session.points().is_consistent());
        }

        let before = session.snapshot();
        let json = serde_json::to_string(&before).expect("serialize");
        let after: GameSnapshot = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(&after, &before);

        for (quiz_id, state) in &before.quiz_states {
            let restored = &after.quiz_states[quiz_id];
            prop_assert_eq!(
                next_active_question_id(restored, None),
                next_active_question_id(state, None)
            );
            for id in state.question_ids() {
                prop_assert_eq!(
                    next_active_question_id(restored, Some(id)),
                    next_active_question_id(state, Some(id))
                );
            }
        }
    }
}
