use serde::Serialize;

use super::{
    settings::BionicSettings,
    word::{split_at_char, split_index},
};

/// One space-delimited token of a paragraph after emphasis.
///
/// An empty `bold` run marks a word that fell between saccade slots, a
/// pictograph, or a pure whitespace token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordUnit {
    pub bold: String,
    pub plain: String,
}

impl WordUnit {
    fn plain(plain: String) -> Self {
        Self {
            bold: String::new(),
            plain,
        }
    }

    pub fn is_emphasized(&self) -> bool {
        !self.bold.is_empty()
    }
}

/// The emphasized form of one text node.
///
/// Concatenating every run in order gives back the original text exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmphasizedFragment {
    pub units: Vec<WordUnit>,
}

impl EmphasizedFragment {
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for unit in &self.units {
            out.push_str(&unit.bold);
            out.push_str(&unit.plain);
        }
        out
    }

    /// Indices of tokens that received a bold run.
    pub fn emphasized_indices(&self) -> Vec<usize> {
        self.units
            .iter()
            .enumerate()
            .filter(|(_, unit)| unit.is_emphasized())
            .map(|(i, _)| i)
            .collect()
    }
}

/// Splits `text` into word units following the saccade rhythm.
///
/// Tokens are separated by a single ASCII space, so runs of spaces produce
/// empty tokens. An empty token that lands on an emphasized slot shifts the
/// rhythm by one, keeping emphasis on words rather than on gaps.
pub fn split(text: &str, settings: BionicSettings) -> EmphasizedFragment {
    let stride = settings.saccade.stride();
    let tokens: Vec<&str> = text.split(' ').collect();
    let last = tokens.len() - 1;
    let mut space_shift = 0;
    let mut units = Vec::with_capacity(tokens.len());

    for (i, token) in tokens.iter().enumerate() {
        let separator = if i == last { "" } else { " " };
        let emphasized = i == 0 || (i + space_shift) % stride == 0;

        if !emphasized {
            units.push(WordUnit::plain(format!("{token}{separator}")));
        } else if token.is_empty() {
            units.push(WordUnit::plain(separator.to_string()));
            space_shift += 1;
        } else {
            let index = split_index(token, settings.fixation);
            let (bold, rest) = split_at_char(token, index);
            units.push(WordUnit {
                bold: bold.to_string(),
                plain: format!("{rest}{separator}"),
            });
        }
    }

    EmphasizedFragment { units }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn settings(fixation: u8, saccade: u8) -> BionicSettings {
        BionicSettings::new(fixation, saccade).unwrap()
    }

    fn unit(bold: &str, plain: &str) -> WordUnit {
        WordUnit {
            bold: bold.to_string(),
            plain: plain.to_string(),
        }
    }

    #[test]
    fn test_every_word_with_stride_one() {
        let fragment = split("the quick fox", settings(50, 1));
        assert_eq!(
            fragment.units,
            vec![unit("t", "he "), unit("qui", "ck "), unit("f", "ox")]
        );
    }

    #[test]
    fn test_stride_three_emphasizes_first_and_fourth() {
        let fragment = split("alpha beta gamma delta epsilon zeta", settings(50, 3));
        assert_eq!(fragment.emphasized_indices(), vec![0, 3]);
        assert_eq!(fragment.units[0], unit("alp", "ha "));
        assert_eq!(fragment.units[3], unit("del", "ta "));
        assert_eq!(fragment.units[5], unit("", "zeta"));
    }

    #[test]
    fn test_stride_five() {
        let text = "one two three four five six seven eight nine ten eleven";
        let fragment = split(text, settings(50, 5));
        assert_eq!(fragment.emphasized_indices(), vec![0, 5, 10]);
    }

    #[test]
    fn test_double_space_is_preserved() {
        let fragment = split("a  b", settings(50, 1));
        assert_eq!(
            fragment.units,
            vec![unit("a", " "), unit("", " "), unit("b", "")]
        );
        assert_eq!(fragment.to_plain_text(), "a  b");
    }

    #[test]
    fn test_gap_off_slot_does_not_shift() {
        // tokens: ["one", "", "two", "three"]; the gap sits on an odd slot
        let fragment = split("one  two three", settings(50, 2));
        assert_eq!(
            fragment.units,
            vec![
                unit("o", "ne "),
                unit("", " "),
                unit("t", "wo "),
                unit("", "three"),
            ]
        );
    }

    #[test]
    fn test_gap_on_slot_shifts_rhythm() {
        // tokens: ["a", "b", "", "c", "d"]; the gap takes slot 2, so "c" keeps the beat
        let fragment = split("a b  c d", settings(50, 2));
        assert_eq!(fragment.emphasized_indices(), vec![0, 3]);
        assert_eq!(fragment.to_plain_text(), "a b  c d");
    }

    #[test]
    fn test_trailing_space_does_not_leak() {
        let fragment = split("word ", settings(50, 1));
        assert_eq!(fragment.units, vec![unit("wo", "rd "), unit("", "")]);
        assert_eq!(fragment.to_plain_text(), "word ");
    }

    #[test]
    fn test_pictograph_occupies_slot_without_bold() {
        let fragment = split("🎉 party", settings(50, 1));
        assert_eq!(fragment.units, vec![unit("", "🎉 "), unit("par", "ty")]);
    }

    #[test]
    fn test_empty_text() {
        let fragment = split("", settings(50, 1));
        assert_eq!(fragment.units, vec![unit("", "")]);
        assert_eq!(fragment.to_plain_text(), "");
    }

    #[rstest]
    #[case("plain sentence with words")]
    #[case("  leading spaces")]
    #[case("trailing spaces  ")]
    #[case("many     gaps   between  words")]
    #[case("tabs\tare\tnot separators")]
    #[case("emoji 🚀 and ünïcödé")]
    #[case(" ")]
    fn test_round_trip(#[case] text: &str) {
        for fixation in [0, 1, 33, 50, 99, 100] {
            for saccade in 1..=5 {
                let fragment = split(text, settings(fixation, saccade));
                assert_eq!(fragment.to_plain_text(), text);
            }
        }
    }
}
