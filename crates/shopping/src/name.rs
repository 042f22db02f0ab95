use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Canonical grouping key for an item or ingredient name.
///
/// Lowercases, strips accents, collapses whitespace and folds a trailing
/// plural `s`/`x` on each word. Plural folding is best effort: "Citron" and
/// "citrons" share a key, an irregular plural simply gets its own.
pub fn normalize(name: &str) -> String {
    fold(name)
        .split_whitespace()
        .map(singular)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase and strip combining marks.
pub(crate) fn fold(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

fn singular(word: &str) -> &str {
    let Some(stem) = word.strip_suffix(['s', 'x']) else {
        return word;
    };

    // A stem ending in s/x would be folded again on a second pass.
    if stem.chars().count() < 3 || stem.ends_with(['s', 'x']) {
        return word;
    }

    stem
}
