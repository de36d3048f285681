//! The immutable quiz catalog.

use hashbrown::HashMap;

use super::model::QuizConfig;
use crate::{
    error::{EngineError, EngineResult},
    types::QuizId,
};

/// Quiz configs in catalog order (`order`, then id) with an id index.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    configs: Vec<QuizConfig>,
    by_id: HashMap<QuizId, usize>,
}

impl Registry {
    /// Build the catalog. Fails on a repeated quiz id.
    pub fn new(mut configs: Vec<QuizConfig>) -> EngineResult<Self> {
        configs.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.quiz.id.cmp(&b.quiz.id)));

        let mut by_id = HashMap::with_capacity(configs.len());
        for (i, config) in configs.iter().enumerate() {
            if by_id.insert(config.quiz.id.clone(), i).is_some() {
                return Err(EngineError::DuplicateQuiz(config.quiz.id.clone()));
            }
        }
        Ok(Self { configs, by_id })
    }

    /// Config of `quiz_id`.
    pub fn get(&self, quiz_id: &str) -> Option<&QuizConfig> {
        self.by_id.get(quiz_id).map(|&i| &self.configs[i])
    }

    /// Config of `quiz_id` or [`EngineError::UnknownQuiz`].
    pub fn require(&self, quiz_id: &str) -> EngineResult<&QuizConfig> {
        self.get(quiz_id)
            .ok_or_else(|| EngineError::UnknownQuiz(quiz_id.to_string()))
    }

    /// Configs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &QuizConfig> {
        self.configs.iter()
    }

    /// Number of quizzes.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// True for an empty catalog.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::EngineConfig,
        quiz::{
            factory::{QuizOptions, quiz_config},
            model::Quiz,
        },
    };

    fn config(id: &str, order: i32) -> QuizConfig {
        let quiz = Quiz {
            id: id.into(),
            title: id.into(),
            questions: Vec::new(),
        };
        let opts = QuizOptions {
            order: Some(order),
            ..QuizOptions::default()
        };
        quiz_config(quiz, opts, &EngineConfig::default())
    }

    #[test]
    fn sorted_by_order_then_id() {
        let reg = Registry::new(vec![config("c", 2), config("b", 1), config("a", 2)]).unwrap();
        let ids: Vec<_> = reg.iter().map(QuizConfig::id).collect();
        assert_eq!(ids, ["b", "a", "c"]);
        assert_eq!(reg.get("a").map(|c| c.order), Some(2));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Registry::new(vec![config("a", 1), config("a", 2)]).unwrap_err();
        assert_eq!(err, EngineError::DuplicateQuiz("a".into()));
    }

    #[test]
    fn unknown_quiz_is_an_error() {
        let reg = Registry::new(vec![config("a", 1)]).unwrap();
        assert_eq!(reg.require("zoo").unwrap_err(), EngineError::UnknownQuiz("zoo".into()));
    }
}
