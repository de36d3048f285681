//! Constructors for the hint presets used by quiz authors.
//!
//! Hint ids are derived from the question id so that a catalog stays stable
//! across rebuilds.

use super::model::{GeneratorKind, Hint, HintKind};
use crate::types::{Points, QuestionId};

/// Default attempt threshold of auto-free hints.
pub const DEFAULT_AUTO_FREE_AFTER: u32 = 5;

fn slug_part(text: &str) -> String {
    text.to_lowercase().split_whitespace().collect::<Vec<_>>().join("_")
}

/// Paid hint revealing the letter count of the answer (5 points).
pub fn letter_count_hint(question_id: QuestionId) -> Hint {
    Hint {
        id: format!("{question_id}_letter_count"),
        title: "Buchstabenanzahl".into(),
        description: "Zeigt die Anzahl der Buchstaben".into(),
        kind: HintKind::Dynamic {
            cost: 5,
            generator: GeneratorKind::LetterCount,
        },
    }
}

/// Paid hint revealing the first letter of the answer (10 points).
pub fn first_letter_hint(question_id: QuestionId) -> Hint {
    Hint {
        id: format!("{question_id}_first_letter"),
        title: "Erster Buchstabe".into(),
        description: "Zeigt den ersten Buchstaben".into(),
        kind: HintKind::Dynamic {
            cost: 10,
            generator: GeneratorKind::FirstLetter,
        },
    }
}

/// Paid hint with authored text.
pub fn custom_hint(question_id: QuestionId, title: &str, content: &str, cost: Points) -> Hint {
    Hint {
        id: format!("{question_id}_custom_{}", slug_part(title)),
        title: title.into(),
        description: format!("Individueller Hinweis: {title}"),
        kind: HintKind::Static {
            cost,
            content: content.into(),
        },
    }
}

/// Free hint fired by wrong answers containing one of `triggers`.
///
/// Returns `None` for an empty trigger list. `title` defaults to
/// `"Knapp daneben"`.
pub fn contextual_hint(
    question_id: QuestionId,
    triggers: &[&str],
    content: &str,
    title: Option<&str>,
) -> Option<Hint> {
    let first = triggers.first()?;
    Some(Hint {
        id: format!("{question_id}_contextual_{}", slug_part(first)),
        title: title.unwrap_or("Knapp daneben").into(),
        description: "Wird bei bestimmten Antworten ausgelöst".into(),
        kind: HintKind::Contextual {
            triggers: triggers.iter().map(|t| (*t).to_string()).collect(),
            content: content.into(),
            trigger_specific_content: None,
        },
    })
}

/// Free hint unlocked after `after` wrong attempts.
pub fn auto_free_hint(question_id: QuestionId, content: &str, after: u32, title: &str) -> Hint {
    Hint {
        id: format!("{question_id}_auto_free"),
        title: title.into(),
        description: format!("Wird nach {after} falschen Versuchen freigeschaltet"),
        kind: HintKind::AutoFree {
            trigger_after_attempts: after,
            content: content.into(),
            escalating_content: None,
        },
    }
}

/// Free hint with several stages, from vague to specific.
///
/// The first stage is the hint's content. Returns `None` without stages.
pub fn escalating_auto_free_hint(question_id: QuestionId, stages: &[&str], after: u32) -> Option<Hint> {
    let first = stages.first()?;
    Some(Hint {
        id: format!("{question_id}_escalating_free"),
        title: "Erweiterte Hilfe".into(),
        description: "Zusätzliche Hinweise nach vielen Versuchen".into(),
        kind: HintKind::AutoFree {
            trigger_after_attempts: after,
            content: (*first).to_string(),
            escalating_content: Some(stages.iter().map(|s| (*s).to_string()).collect()),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_question_id() {
        assert_eq!(letter_count_hint(3).id, "3_letter_count");
        assert_eq!(first_letter_hint(3).id, "3_first_letter");
        assert_eq!(auto_free_hint(3, "x", 5, "Kleiner Tipp").id, "3_auto_free");
    }

    #[test]
    fn paid_presets_have_fixed_prices() {
        assert_eq!(letter_count_hint(1).cost(), 5);
        assert_eq!(first_letter_hint(1).cost(), 10);
        assert_eq!(custom_hint(1, "Lebensraum", "Savanne", 12).cost(), 12);
    }

    #[test]
    fn custom_id_slugs_title() {
        let hint = custom_hint(4, "Lebens  Raum Info", "Wald", 8);
        assert_eq!(hint.id, "4_custom_lebens_raum_info");
        assert_eq!(hint.description, "Individueller Hinweis: Lebens  Raum Info");
    }

    #[test]
    fn contextual_defaults_and_rejects_empty_triggers() {
        let hint = contextual_hint(2, &["Schwarzer Panther", "puma"], "Fast!", None).unwrap();
        assert_eq!(hint.id, "2_contextual_schwarzer_panther");
        assert_eq!(hint.title, "Knapp daneben");
        assert!(hint.is_contextual());
        assert!(contextual_hint(2, &[], "Fast!", None).is_none());
    }

    #[test]
    fn escalating_uses_first_stage_as_content() {
        let hint = escalating_auto_free_hint(9, &["vage", "genauer"], 4).unwrap();
        assert_eq!(hint.id, "9_escalating_free");
        match hint.kind {
            HintKind::AutoFree { trigger_after_attempts, content, escalating_content } => {
                assert_eq!(trigger_after_attempts, 4);
                assert_eq!(content, "vage");
                assert_eq!(escalating_content.unwrap().len(), 2);
            }
            other => panic!("unexpected kind {other:?}"),
        }
        assert!(escalating_auto_free_hint(9, &[], 4).is_none());
    }
}
