//! Rule-based German phonetic codes ("Kölner Phonetik" style).
//!
//! A word is scanned left to right and every letter (or `sch`/`ch`/`ph`
//! digraph) is mapped to a digit `0..=8`, where `0` stands for vowels. The raw
//! digit string is then collapsed: the first digit always survives, every
//! later `0` is dropped and runs of the same digit shrink to one.
//!
//! ```
//! use rateviech::text::phonetic::encode;
//!
//! assert_eq!(encode("Müller"), "657");
//! assert_eq!(encode("Mueller"), encode("Müller"));
//! assert_eq!(encode("Meier Fischer GmbH"), "67387461");
//! ```

use unicode_normalization::UnicodeNormalization;

use super::normalize::fold_umlauts;

/// Letters treated as vowels by the `ch` rule.
fn is_vowel(c: Option<char>) -> bool {
    matches!(c, Some('a' | 'e' | 'i' | 'j' | 'o' | 'u' | 'y' | 'ä' | 'ö' | 'ü'))
}

/// Lowercase a single word and spell out umlauts.
///
/// Unlike [`super::normalize::normalize`] nothing else is stripped; unknown
/// characters are simply skipped by the encoder.
pub fn preprocess_word(word: &str) -> String {
    let composed: String = word.nfc().collect();
    fold_umlauts(&composed.to_lowercase())
}

/// Digit for a `c` that is not the start of `ch`.
fn code_for_c(prev: Option<char>, next: Option<char>) -> &'static str {
    match (prev, next) {
        (None, Some('a' | 'h' | 'k' | 'l' | 'o' | 'q' | 'r' | 'u' | 'x')) => "4",
        (None, _) => "8",
        (Some(_), Some('a' | 'h' | 'k' | 'o' | 'q' | 'u' | 'x')) => "4",
        (Some(_), _) => "8",
    }
}

/// Digit for the `ch` digraph starting at `i` in a word of `len` chars.
fn code_for_ch(i: usize, len: usize, prev: Option<char>) -> &'static str {
    if i + 2 == len {
        "8"
    } else if prev.is_none() || is_vowel(prev) {
        "4"
    } else {
        "8"
    }
}

/// Digit(s) for a single letter, or `None` when the character carries no sound.
fn code_for_letter(c: char, prev: Option<char>, next: Option<char>) -> Option<&'static str> {
    let code = match c {
        'a' | 'e' | 'i' | 'j' | 'o' | 'u' | 'y' | 'ä' | 'ö' | 'ü' => "0",
        'b' | 'p' => "1",
        'd' | 't' => match next {
            Some('c' | 's' | 'z') => "8",
            _ => "2",
        },
        'f' | 'v' | 'w' => "3",
        'g' | 'k' | 'q' => "4",
        'l' => "5",
        'm' | 'n' => "6",
        'r' => "7",
        's' | 'z' => "8",
        'c' => code_for_c(prev, next),
        'x' => match prev {
            Some('c' | 'k' | 'q') => "8",
            _ => "48",
        },
        _ => return None,
    };
    Some(code)
}

/// Raw (uncollapsed) digit string of one preprocessed word.
fn raw_code(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let len = chars.len();
    let mut raw = String::with_capacity(len + 2);

    let mut i = 0;
    while i < len {
        let c = chars[i];
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        let after_next = chars.get(i + 2).copied();

        match (c, next, after_next) {
            ('s', Some('c'), Some('h')) => {
                raw.push('8');
                i += 3;
            }
            ('c', Some('h'), _) => {
                raw.push_str(code_for_ch(i, len, prev));
                i += 2;
            }
            ('p', Some('h'), _) => {
                raw.push('3');
                i += 2;
            }
            ('h', _, _) => i += 1,
            _ => {
                if let Some(code) = code_for_letter(c, prev, next) {
                    raw.push_str(code);
                }
                i += 1;
            }
        }
    }
    raw
}

/// Collapse a raw digit string.
///
/// Keeps the first digit even if it is `0`, drops every later `0`, then
/// merges consecutive equal digits: `"10203"` becomes `"123"`, `"010203"`
/// becomes `"0123"`.
pub fn collapse_code(raw: &str) -> String {
    let mut digits = raw.chars();
    let Some(first) = digits.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(raw.len());
    out.push(first);
    let mut last = first;
    for d in digits.filter(|d| *d != '0') {
        if d != last {
            out.push(d);
            last = d;
        }
    }
    out
}

/// Code of a single word (preprocessed and collapsed).
pub fn encode_word(word: &str) -> String {
    collapse_code(&raw_code(&preprocess_word(word)))
}

/// Phonetic code of a phrase.
///
/// Each whitespace-separated word is encoded on its own; the word codes are
/// concatenated and collapsed once more. Empty or letterless input yields an
/// empty code.
pub fn encode(phrase: &str) -> String {
    let joined: String = phrase.split_whitespace().map(encode_word).collect();
    collapse_code(&joined)
}
