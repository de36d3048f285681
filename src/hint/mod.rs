//! Hint lifecycle: definitions, eligibility, triggers and reveal.
//!
//! Per question the engine tracks wrong attempts, revealed hints and consumed
//! auto-free hints (see [`crate::quiz::HintState`]). Paid hints debit the
//! global [`crate::points::UserPoints`] wallet.

pub mod apply;
pub mod content;
pub mod eligibility;
pub mod factory;
pub mod model;
pub mod trigger;

pub use apply::{HintOutcome, HintTransition, apply_hint};
pub use content::{contextual_content, resolve_content};
pub use eligibility::{available_hints, can_use};
pub use model::{AvailableHint, GeneratorKind, Hint, HintDenial, HintKind, UsedHint};
pub use trigger::{HintTriggerResult, check_auto_free, check_contextual, check_triggered};
