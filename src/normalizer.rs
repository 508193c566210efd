use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static FILLER_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(credit|card|bank)\b").unwrap());
static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Reduces a card name to the words that tell cards apart.
///
/// "HDFC Bank Regalia Credit Card" and "hdfc regalia" both become
/// "hdfc regalia".
pub fn normalize_card_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let without_filler = FILLER_WORDS.replace_all(&lowered, "");
    let without_punctuation = PUNCTUATION.replace_all(&without_filler, "");
    WHITESPACE
        .replace_all(&without_punctuation, " ")
        .trim()
        .to_string()
}

/// Share of the input's normalized words that also occur in the candidate.
pub fn word_overlap(input: &str, candidate: &str) -> f64 {
    let input = normalize_card_name(input);
    let candidate = normalize_card_name(candidate);
    let input_words: HashSet<&str> = input.split_whitespace().collect();
    let candidate_words: HashSet<&str> = candidate.split_whitespace().collect();

    let common = input_words.intersection(&candidate_words).count();
    common as f64 / input_words.len().max(1) as f64
}
