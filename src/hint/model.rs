//! Hint definitions and hint-related results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{HintId, Points};

/// Content generator of a [`HintKind::Dynamic`] hint.
///
/// Only this tag is persisted; the text is recomputed from the question on
/// every resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// Number of characters of the normalized answer.
    LetterCount,
    /// Uppercased first character of the answer.
    FirstLetter,
}

/// Variant-specific part of a [`Hint`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum HintKind {
    /// Fixed text bought with points.
    Static {
        /// Price in points.
        cost: Points,
        /// Revealed text.
        content: String,
    },
    /// Text computed from the question, bought with points.
    Dynamic {
        /// Price in points.
        cost: Points,
        /// Which generator produces the text.
        generator: GeneratorKind,
    },
    /// Free text revealed when a wrong answer contains a trigger phrase.
    Contextual {
        /// Phrases matched against the normalized wrong answer.
        triggers: Vec<String>,
        /// Fallback text.
        content: String,
        /// Text per trigger phrase, preferred over `content` when its key matches.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trigger_specific_content: Option<BTreeMap<String, String>>,
    },
    /// Free text unlocked after enough wrong attempts. Fires once.
    AutoFree {
        /// Wrong attempts needed before the hint becomes usable.
        trigger_after_attempts: u32,
        /// Revealed text.
        content: String,
        /// Stages from vague to specific; `content` is the first stage.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        escalating_content: Option<Vec<String>>,
    },
}

/// A hint attached to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    /// Unique within the question.
    pub id: HintId,
    /// Short label shown on the hint button.
    pub title: String,
    /// Longer explanation of what the hint reveals.
    #[serde(default)]
    pub description: String,
    /// Variant data, flattened next to the shared fields.
    #[serde(flatten)]
    pub kind: HintKind,
}

impl Hint {
    /// Points a purchase costs; free variants cost nothing.
    pub fn cost(&self) -> Points {
        match &self.kind {
            HintKind::Static { cost, .. } | HintKind::Dynamic { cost, .. } => *cost,
            HintKind::Contextual { .. } | HintKind::AutoFree { .. } => 0,
        }
    }

    /// True for `Static` and `Dynamic` hints.
    pub fn is_purchasable(&self) -> bool {
        matches!(self.kind, HintKind::Static { .. } | HintKind::Dynamic { .. })
    }

    /// True for `Contextual` hints.
    pub fn is_contextual(&self) -> bool {
        matches!(self.kind, HintKind::Contextual { .. })
    }

    /// True for `AutoFree` hints.
    pub fn is_auto_free(&self) -> bool {
        matches!(self.kind, HintKind::AutoFree { .. })
    }
}

/// Record of a revealed hint. The content is resolved once and stored as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsedHint {
    /// Hint id.
    pub id: HintId,
    /// Hint title at the time of use.
    pub title: String,
    /// Resolved text.
    pub content: String,
}

/// Why a hint cannot be used right now.
///
/// These are ordinary game outcomes, not engine failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum HintDenial {
    /// Already revealed for this question.
    #[error("Hint bereits verwendet")]
    AlreadyUsed,
    /// Auto-free hint before its attempt threshold.
    #[error("Erst nach {required} falschen Versuchen")]
    NotYetTriggered {
        /// Threshold of the hint.
        required: u32,
        /// Current wrong attempts.
        wrong_attempts: u32,
    },
    /// Contextual hints only appear through wrong answers.
    #[error("Wird durch Antworten ausgelöst")]
    TriggeredOnly,
    /// Balance below the hint price.
    #[error("Nicht genug Punkte")]
    InsufficientPoints {
        /// Hint price.
        required: Points,
        /// Current balance.
        available: Points,
    },
}

/// One entry of the hint list shown for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableHint {
    /// The hint definition.
    pub hint: Hint,
    /// Set when the hint cannot be used now.
    pub denial: Option<HintDenial>,
    /// Resolved text, present only when the hint is usable.
    pub content: Option<String>,
}

impl AvailableHint {
    /// True when no denial applies.
    pub fn can_use(&self) -> bool {
        self.denial.is_none()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn dynamic_hint_serializes_only_its_generator_tag() {
        let hint = Hint {
            id: "7_letter_count".into(),
            title: "Buchstabenanzahl".into(),
            description: String::new(),
            kind: HintKind::Dynamic {
                cost: 5,
                generator: GeneratorKind::LetterCount,
            },
        };
        let value = serde_json::to_value(&hint).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "7_letter_count",
                "title": "Buchstabenanzahl",
                "description": "",
                "type": "dynamic",
                "cost": 5,
                "generator": "letter_count",
            })
        );
        let back: Hint = serde_json::from_value(value).unwrap();
        assert_eq!(back, hint);
    }

    #[test]
    fn auto_free_uses_camel_case_fields() {
        let raw = json!({
            "id": "1_auto_free",
            "title": "Kleiner Tipp",
            "type": "auto_free",
            "triggerAfterAttempts": 3,
            "content": "Es lebt im Wasser",
        });
        let hint: Hint = serde_json::from_value(raw).unwrap();
        assert!(hint.is_auto_free());
        assert_eq!(hint.cost(), 0);
        assert!(matches!(
            hint.kind,
            HintKind::AutoFree { trigger_after_attempts: 3, escalating_content: None, .. }
        ));
    }

    #[test]
    fn denial_messages_are_user_facing() {
        let denial = HintDenial::NotYetTriggered { required: 5, wrong_attempts: 4 };
        assert_eq!(denial.to_string(), "Erst nach 5 falschen Versuchen");
        assert_eq!(HintDenial::TriggeredOnly.to_string(), "Wird durch Antworten ausgelöst");
    }
}
