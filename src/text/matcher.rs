//! Answer equivalence: normalized exact match, phonetic match, alternates.

use tracing::debug;

use super::{normalize::normalize, phonetic::encode};

/// True when both phrases produce the same non-empty phonetic code.
///
/// Inputs that are empty after trimming never match.
pub fn phonetically_similar(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    if a.is_empty() || b.is_empty() {
        return false;
    }
    let (code_a, code_b) = (encode(a), encode(b));
    !code_a.is_empty() && code_a == code_b
}

/// Decide whether `user_answer` counts as `correct_answer`.
///
/// Checks, in order: equal normalized slugs, equal phonetic codes, then the
/// same two tests against every non-empty alternate. An empty user answer or
/// an empty canonical answer is never correct.
pub fn is_correct(user_answer: &str, correct_answer: &str, alternates: &[String]) -> bool {
    if user_answer.is_empty() || correct_answer.is_empty() {
        return false;
    }

    let user = normalize(user_answer);
    if user == normalize(correct_answer) {
        debug!(target: "rateviech", rule = "normalized", "answer matched");
        return true;
    }

    if phonetically_similar(user_answer, correct_answer) {
        debug!(target: "rateviech", rule = "phonetic", "answer matched");
        return true;
    }

    let hit = alternates
        .iter()
        .filter(|alt| !alt.is_empty())
        .position(|alt| normalize(alt) == user || phonetically_similar(alt, user_answer));
    if let Some(index) = hit {
        debug!(target: "rateviech", rule = "alternate", index, "answer matched");
        return true;
    }
    false
}
