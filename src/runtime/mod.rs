//! Single-writer async runtime around a [`crate::core::session::GameSession`].

/// Events broadcast by the runtime loop.
pub mod events;
/// Session handle and command loop.
pub mod handle;
