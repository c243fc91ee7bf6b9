use std::sync::OnceLock;

use regex::Regex;

use super::settings::Fixation;

/// Returns true when the word contains an emoji-like glyph.
///
/// Bolding half a pictograph is meaningless, so such words get no emphasis.
pub fn is_pictographic(word: &str) -> bool {
    static PICTOGRAPHIC: OnceLock<Regex> = OnceLock::new();
    PICTOGRAPHIC
        .get_or_init(|| {
            Regex::new(r"\p{Extended_Pictographic}").expect("Invalid pictographic regex")
        })
        .is_match(word)
}

/// Number of leading characters of `word` to render bold.
///
/// Lengths count Unicode scalar values. Words longer than three characters
/// round the fixation share up; short words round down but always keep at
/// least one bold character, unless fixation is zero.
pub fn split_index(word: &str, fixation: Fixation) -> usize {
    let len = word.chars().count();
    if len == 0 || is_pictographic(word) {
        return 0;
    }

    let percent = usize::from(fixation.percent());
    let index = if len > 3 {
        (len * percent).div_ceil(100)
    } else if percent == 0 {
        0
    } else {
        ((len * percent) / 100).max(1)
    };
    index.min(len)
}

/// Splits `word` at `index` characters into its bold and plain halves.
pub fn split_at_char(word: &str, index: usize) -> (&str, &str) {
    let byte = word
        .char_indices()
        .nth(index)
        .map_or(word.len(), |(byte, _)| byte);
    word.split_at(byte)
}
