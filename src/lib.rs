//! Animal-name quiz engine: tolerant answer matching, question progression,
//! quiz unlocking and a points-funded hint system.
//!
//! # Examples
//!
//! Matching answers directly:
//! ```
//! use rateviech::text::is_correct;
//!
//! assert!(is_correct("Fisher", "Fischer", &[]));
//! assert!(is_correct("Schnee-Eule", "Schneeeule", &["Schnee Eule".to_string()]));
//! assert!(!is_correct("Hund", "Katze", &[]));
//! ```
//!
//! Playing a quiz through a [`core::session::GameSession`]:
//! ```
//! use rateviech::{
//!     config::EngineConfig,
//!     core::session::GameSession,
//!     quiz::{Question, Quiz, Registry, factory::{QuizOptions, quiz_config}},
//! };
//!
//! let config = EngineConfig::default();
//! let quiz = Quiz {
//!     id: "wald".to_string(),
//!     title: "Waldtiere".to_string(),
//!     questions: vec![Question {
//!         id: 1,
//!         answer: "Reh".to_string(),
//!         alternative_answers: vec![],
//!         hints: vec![],
//!     }],
//! };
//! let registry = Registry::new(vec![quiz_config(quiz, QuizOptions::default(), &config)])
//!     .expect("registry");
//!
//! let mut session = GameSession::new(registry, config);
//! let outcome = session.submit_answer("wald", 1, "reh").expect("answer");
//! assert!(outcome.correct);
//! assert!(outcome.completed_quiz);
//! assert_eq!(session.points().total_points, 60);
//! ```
//!
//! Runtime usage with a SQLite store:
//! ```no_run
//! use rateviech::{
//!     config::EngineConfig,
//!     core::session::GameSession,
//!     persist::{SnapshotStore, sqlite::SqliteSnapshotStore},
//!     quiz::Registry,
//!     runtime::handle::{RuntimeConfig, spawn_session},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! # let registry = Registry::new(vec![]).expect("registry");
//! let store = SqliteSnapshotStore::open("rateviech.db").expect("open sqlite");
//! let saved = store.load().expect("load");
//! let session = GameSession::restore(registry, EngineConfig::default(), saved);
//! let handle = spawn_session(session, Some(Box::new(store)), RuntimeConfig::default());
//! let _outcome = handle.submit_answer("wald", 1, "Reh").await.expect("answer");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Engine settings.
pub mod config;
/// Session ownership and the persisted snapshot.
pub mod core;
/// Engine error types.
pub mod error;
/// Hint definitions and lifecycle.
pub mod hint;
/// Persistence abstraction and SQLite implementation.
pub mod persist;
/// The points wallet.
pub mod points;
/// Quizzes, progression and unlocking.
pub mod quiz;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Normalization, phonetic codes and answer matching.
pub mod text;
/// Shared primitive types and enums.
pub mod types;

pub use error::{EngineError, EngineResult};
