use crate::model::{CardIndex, CardKind, SearchResult};

/// Token separators: Unicode `White_Space` minus U+0085 (NEL), plus U+FEFF.
fn is_separator(c: char) -> bool {
    match c {
        '\u{85}' => false,
        '\u{feff}' => true,
        _ => c.is_whitespace(),
    }
}

/// Splits a query on whitespace into lower-cased, non-empty tokens.
fn tokenize(query: &str) -> Vec<String> {
    query
        .split(is_separator)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// True when the lower-cased name contains every token, in any order.
fn matches_all(name: &str, tokens: &[String]) -> bool {
    let name = name.to_lowercase();
    tokens.iter().all(|t| name.contains(t.as_str()))
}

/// Multi-token substring search over both card sets.
///
/// An empty query yields an empty result rather than every card.
pub fn search(query: &str, index: &CardIndex) -> SearchResult {
    let tokens = tokenize(query);
    let mut result = SearchResult::default();
    if tokens.is_empty() {
        return result;
    }

    for kind in [CardKind::Credit, CardKind::Debit] {
        let hits = index
            .cards(kind)
            .iter()
            .filter(|name| matches_all(name, &tokens))
            .cloned()
            .collect();
        result.push_section(kind, hits);
    }
    result
}
