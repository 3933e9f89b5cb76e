use std::collections::BTreeSet;

/// Lower-cased search tokens of `text`.
///
/// The union of a whitespace split and a split on runs of non-word
/// characters, so `"T-cell"` yields `t-cell`, `t` and `cell`. Empty pieces
/// are dropped.
#[must_use]
pub fn tokenize(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    let mut tokens = lower
        .split_whitespace()
        .map(ToString::to_string)
        .collect::<BTreeSet<_>>();
    tokens.extend(
        lower
            .split(|c: char| !is_word_char(c))
            .filter(|piece| !piece.is_empty())
            .map(ToString::to_string),
    );
    tokens
}

/// Strip one trailing `s`/`S` from `token`, keeping at least one character.
///
/// A lone `"s"` is returned unchanged: an empty token would prefix-match
/// every entry.
#[must_use]
pub fn depluralize(token: &str) -> &str {
    match token.strip_suffix(['s', 'S']) {
        Some(stem) if !stem.is_empty() => stem,
        _ => token,
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
