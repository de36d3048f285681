//! Canonical answer slugs.
//!
//! Answers are compared as lowercase ASCII slugs: umlauts are spelled out,
//! accents are dropped, punctuation disappears and any run of whitespace or
//! hyphens becomes a single `-`.

use unicode_normalization::UnicodeNormalization;

/// Spell out German umlauts and `ß` (`ä -> ae`, `ö -> oe`, `ü -> ue`, `ß -> ss`).
///
/// Expects lowercase input; uppercase umlauts are left untouched.
pub fn fold_umlauts(lower: &str) -> String {
    let mut out = String::with_capacity(lower.len() + 4);
    for c in lower.chars() {
        match c {
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'ß' => out.push_str("ss"),
            other => out.push(other),
        }
    }
    out
}

/// Normalize free text into a canonical slug.
///
/// Total, deterministic and idempotent. `"Für den Bäcker"` becomes
/// `"fuer-den-baecker"`, `"Crème brûlée"` becomes `"creme-brulee"`.
pub fn normalize(input: &str) -> String {
    // Compose first so a decomposed `a` + U+0308 folds like `ä`.
    let composed: String = input.nfc().collect();
    let folded = fold_umlauts(&composed.to_lowercase());

    // NFD splits accented letters into base + combining mark; the filter then
    // drops the marks together with every other character outside the slug
    // alphabet.
    let kept: String = folded
        .nfd()
        .filter(|c| matches!(*c, 'a'..='z' | '0'..='9' | '-') || c.is_whitespace())
        .collect();

    kept.split(|c: char| c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
