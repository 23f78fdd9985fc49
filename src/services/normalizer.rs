/// Punctuation folded to a space before comparison
const FOLDED_PUNCTUATION: [char; 6] = ['-', '_', '.', ',', ':', ';'];

/// Canonicalizes a title for comparison
///
/// Lowercases, turns `-_.,:;` into spaces, collapses whitespace runs to a
/// single space and trims. Total and idempotent; blank input yields `""`.
pub fn normalize(raw: &str) -> String {
    let folded: String = raw
        .to_lowercase()
        .chars()
        .map(|c| if FOLDED_PUNCTUATION.contains(&c) { ' ' } else { c })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Words of an already normalized title
pub fn words(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split(' ').filter(|w| !w.is_empty())
}
