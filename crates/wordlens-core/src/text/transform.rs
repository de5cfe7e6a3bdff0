//! Case and order transforms over a whole text value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Which transform to apply to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    /// Every character mapped to its upper-case form.
    Upper,
    /// Every character mapped to its lower-case form.
    Lower,
    /// First character of each space-separated word upper-cased, rest lower-cased.
    Capitalize,
    /// Characters in reverse order.
    Reverse,
}

impl TransformKind {
    /// Returns all transforms in display order.
    pub fn all() -> &'static [TransformKind] {
        &[
            TransformKind::Upper,
            TransformKind::Lower,
            TransformKind::Capitalize,
            TransformKind::Reverse,
        ]
    }

    /// Returns the short name used on the command line and in config.
    pub fn name(self) -> &'static str {
        match self {
            TransformKind::Upper => "upper",
            TransformKind::Lower => "lower",
            TransformKind::Capitalize => "capitalize",
            TransformKind::Reverse => "reverse",
        }
    }

    /// Applies the transform, returning the replacement text.
    ///
    /// `grapheme_reverse` only affects [`TransformKind::Reverse`].
    pub fn apply(self, text: &str, grapheme_reverse: bool) -> String {
        match self {
            TransformKind::Upper => text.to_uppercase(),
            TransformKind::Lower => text.to_lowercase(),
            TransformKind::Capitalize => capitalize(text),
            TransformKind::Reverse if grapheme_reverse => reverse_graphemes(text),
            TransformKind::Reverse => reverse(text),
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a transform name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTransformError(String);

impl fmt::Display for ParseTransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown transform '{}' (expected upper, lower, capitalize or reverse)",
            self.0
        )
    }
}

impl std::error::Error for ParseTransformError {}

impl FromStr for TransformKind {
    type Err = ParseTransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upper" | "uppercase" => Ok(TransformKind::Upper),
            "lower" | "lowercase" => Ok(TransformKind::Lower),
            "capitalize" | "cap" | "title" => Ok(TransformKind::Capitalize),
            "reverse" | "rev" => Ok(TransformKind::Reverse),
            _ => Err(ParseTransformError(s.to_string())),
        }
    }
}

/// Capitalizes each word, where words are separated by a single `' '`.
///
/// Runs of spaces produce empty words, which pass through untouched, so the
/// original spacing survives. Tabs and newlines are not separators.
pub fn capitalize(text: &str) -> String {
    text.split(' ')
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(word.len());
    out.extend(first.to_uppercase());
    out.push_str(&chars.as_str().to_lowercase());
    out
}

/// Reverses the text one `char` (Unicode scalar value) at a time.
///
/// Combining marks end up before their base character and multi-scalar
/// emoji are split apart. Use [`reverse_graphemes`] to keep clusters intact.
pub fn reverse(text: &str) -> String {
    text.chars().rev().collect()
}

/// Reverses the text one extended grapheme cluster at a time.
pub fn reverse_graphemes(text: &str) -> String {
    text.graphemes(true).rev().collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_upper_and_lower() {
        assert_eq!(TransformKind::Upper.apply("Hello, World!", false), "HELLO, WORLD!");
        assert_eq!(TransformKind::Lower.apply("Hello, World!", false), "hello, world!");
    }

    #[test]
    fn test_upper_uses_full_case_mapping() {
        assert_eq!(TransformKind::Upper.apply("straße", false), "STRASSE");
    }

    #[test]
    fn test_capitalize_basic() {
        assert_eq!(capitalize("hello world"), "Hello World");
        assert_eq!(capitalize("hELLO wORLD"), "Hello World");
    }

    #[test]
    fn test_capitalize_preserves_space_runs() {
        assert_eq!(capitalize("HELLO   WORLD"), "Hello   World");
        assert_eq!(capitalize("  leading and trailing  "), "  Leading And Trailing  ");
    }

    #[test]
    fn test_capitalize_only_splits_on_space() {
        assert_eq!(capitalize("hello\tworld"), "Hello\tworld");
        assert_eq!(capitalize("one\ntwo three"), "One\ntwo Three");
    }

    #[test]
    fn test_capitalize_empty_and_spaces_only() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("   "), "   ");
    }

    #[test]
    fn test_capitalize_is_stable_on_capitalized_input() {
        let once = capitalize("the quick BROWN fox");
        assert_eq!(once, "The Quick Brown Fox");
        assert_eq!(capitalize(&once), once);
    }

    #[test]
    fn test_reverse_by_char() {
        assert_eq!(reverse("abc def"), "fed cba");
        assert_eq!(reverse(""), "");
        // Combining acute accent detaches from its base.
        assert_eq!(reverse("e\u{301}x"), "x\u{301}e");
    }

    #[test]
    fn test_reverse_graphemes_keeps_clusters() {
        assert_eq!(reverse_graphemes("e\u{301}x"), "xe\u{301}");
        assert_eq!(
            TransformKind::Reverse.apply("ab\u{1F44D}\u{1F3FD}", true),
            "\u{1F44D}\u{1F3FD}ba"
        );
    }

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!("upper".parse(), Ok(TransformKind::Upper));
        assert_eq!("UPPERCASE".parse(), Ok(TransformKind::Upper));
        assert_eq!("lowercase".parse(), Ok(TransformKind::Lower));
        assert_eq!("cap".parse(), Ok(TransformKind::Capitalize));
        assert_eq!(" rev ".parse(), Ok(TransformKind::Reverse));
        assert!("shout".parse::<TransformKind>().is_err());
    }

    #[test]
    fn test_names_round_trip_through_parse() {
        for kind in TransformKind::all() {
            assert_eq!(kind.to_string().parse::<TransformKind>(), Ok(*kind));
        }
    }

    proptest! {
        #[test]
        fn prop_reverse_is_an_involution(s in any::<String>()) {
            prop_assert_eq!(reverse(&reverse(&s)), s);
        }

        #[test]
        fn prop_upper_is_idempotent(s in any::<String>()) {
            let once = TransformKind::Upper.apply(&s, false);
            prop_assert_eq!(TransformKind::Upper.apply(&once, false), once);
        }

        #[test]
        fn prop_lower_is_idempotent(s in any::<String>()) {
            let once = TransformKind::Lower.apply(&s, false);
            prop_assert_eq!(TransformKind::Lower.apply(&once, false), once);
        }

        #[test]
        fn prop_capitalize_keeps_space_count(s in "[a-zA-Z ]{0,64}") {
            let spaces = s.matches(' ').count();
            prop_assert_eq!(capitalize(&s).matches(' ').count(), spaces);
        }
    }
}
