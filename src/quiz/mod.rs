//! Quiz content, progression and unlocking.

pub mod factory;
pub mod model;
pub mod progression;
pub mod registry;
pub mod stats;
pub mod unlock;

pub use model::{
    HintState, Question, QuestionState, Quiz, QuizConfig, QuizState, QuizStates, UnlockCondition,
};
pub use registry::Registry;
