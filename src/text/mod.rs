//! Text processing for answer matching.

pub mod matcher;
pub mod normalize;
pub mod phonetic;

pub use matcher::{is_correct, phonetically_similar};
pub use normalize::normalize;
pub use phonetic::encode;
