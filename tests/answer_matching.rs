use rateviech::text::{encode, is_correct, normalize, phonetically_similar};

fn alts(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn transliterated_umlauts_match() {
    assert!(is_correct("Mueller", "Müller", &[]));
    assert!(is_correct("Eichhoernchen", "Eichhörnchen", &[]));
    assert!(is_correct("Strauss", "Strauß", &[]));
}

#[test]
fn unrelated_names_do_not_match() {
    assert!(!is_correct("Schmidt", "Meyer", &[]));
    assert!(!is_correct("Hund", "Katze", &[]));
}

#[test]
fn case_punctuation_and_spacing_are_ignored() {
    assert!(is_correct("  rotkehlchen! ", "Rotkehlchen", &[]));
    assert!(is_correct("Schnee   Eule", "Schnee-Eule", &[]));
    assert_eq!(normalize("  Weißer   Hai -- "), "weisser-hai");
}

#[test]
fn sound_alike_spellings_match() {
    assert!(phonetically_similar("Fischer", "Fisher"));
    assert!(is_correct("Maier", "Meyer", &[]));
    assert!(is_correct("Fisher", "Fischer", &[]));
}

#[test]
fn alternates_are_checked_after_the_canonical_answer() {
    let alternates = alts(&["", "Eichkätzchen"]);
    assert!(is_correct("eichkaetzchen", "Eichhörnchen", &alternates));
    assert!(!is_correct("Marder", "Eichhörnchen", &alternates));
}

#[test]
fn empty_inputs_are_never_correct() {
    assert!(!is_correct("", "Reh", &[]));
    assert!(!is_correct("Reh", "", &alts(&["Reh"])));
    assert_eq!(encode("   "), "");
    assert!(!phonetically_similar(" ", "Reh"));
}

#[test]
fn multi_word_phrases_encode_word_by_word() {
    assert_eq!(encode("Meier Fischer GmbH"), "67387461");
    assert_eq!(encode("Fischer"), "387");
}
