//! Hint text resolution.

use super::model::{GeneratorKind, Hint, HintKind};
use crate::{quiz::Question, text::normalize};

/// Text produced by a generator for `question`.
pub fn generate(kind: GeneratorKind, question: &Question) -> String {
    match kind {
        GeneratorKind::LetterCount => {
            let letters = normalize(&question.answer).chars().count();
            format!("Das gesuchte Tier hat {letters} Buchstaben")
        }
        GeneratorKind::FirstLetter => {
            let first: String = question
                .answer
                .trim()
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_default();
            format!("Das gesuchte Tier beginnt mit \"{first}\"")
        }
    }
}

/// Text a hint reveals for `question`.
pub fn resolve_content(hint: &Hint, question: &Question) -> String {
    match &hint.kind {
        HintKind::Dynamic { generator, .. } => generate(*generator, question),
        HintKind::Static { content, .. }
        | HintKind::Contextual { content, .. }
        | HintKind::AutoFree { content, .. } => content.clone(),
    }
}

/// Text of a contextual hint for the wrong answer that fired it.
///
/// Picks the first `trigger_specific_content` entry whose normalized key is
/// contained in the normalized answer, else the hint's `content`. `None` for
/// other hint kinds.
pub fn contextual_content<'a>(hint: &'a Hint, user_answer: &str) -> Option<&'a str> {
    let HintKind::Contextual {
        content,
        trigger_specific_content,
        ..
    } = &hint.kind
    else {
        return None;
    };

    let answer = normalize(user_answer);
    let specific = trigger_specific_content.iter().flatten().find_map(|(trigger, text)| {
        let trigger = normalize(trigger);
        (!trigger.is_empty() && answer.contains(&trigger)).then_some(text.as_str())
    });
    Some(specific.unwrap_or(content.as_str()))
}
