//! Statistics derived from a text value.
//!
//! None of these are cached: callers recompute from the current text on
//! every read, so they can never go stale.

use serde::{Deserialize, Serialize};

/// Average adult silent reading speed.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Snapshot of the derived statistics for one text value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub words: usize,
    pub characters: usize,
    pub reading_time_minutes: usize,
}

impl TextStats {
    /// Computes all statistics for `text`.
    pub fn of(text: &str, words_per_minute: u32) -> Self {
        let words = word_count(text);
        Self {
            words,
            characters: character_count(text),
            reading_time_minutes: reading_time_minutes(words, words_per_minute),
        }
    }
}

/// Counts words separated by runs of whitespace.
///
/// Surrounding whitespace is ignored, so blank text has zero words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Counts every `char` in the text, whitespace and punctuation included.
pub fn character_count(text: &str) -> usize {
    text.chars().count()
}

/// Minutes needed to read `words`, rounded up.
///
/// A `words_per_minute` of zero is treated as one.
pub fn reading_time_minutes(words: usize, words_per_minute: u32) -> usize {
    let wpm = words_per_minute.max(1) as usize;
    words.div_ceil(wpm)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_word_count_blank() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("\t\n "), 0);
    }

    #[test]
    fn test_word_count_collapses_separators() {
        assert_eq!(word_count("a  b   c"), 3);
        assert_eq!(word_count("  one\ttwo\nthree  "), 3);
        assert_eq!(word_count("single"), 1);
    }

    #[test]
    fn test_character_count_includes_whitespace() {
        assert_eq!(character_count(""), 0);
        assert_eq!(character_count("a b"), 3);
        assert_eq!(character_count("  \n"), 3);
        assert_eq!(character_count("héllo"), 5);
    }

    #[test]
    fn test_reading_time_boundaries() {
        assert_eq!(reading_time_minutes(0, DEFAULT_WORDS_PER_MINUTE), 0);
        assert_eq!(reading_time_minutes(1, DEFAULT_WORDS_PER_MINUTE), 1);
        assert_eq!(reading_time_minutes(200, DEFAULT_WORDS_PER_MINUTE), 1);
        assert_eq!(reading_time_minutes(201, DEFAULT_WORDS_PER_MINUTE), 2);
        assert_eq!(reading_time_minutes(400, DEFAULT_WORDS_PER_MINUTE), 2);
    }

    #[test]
    fn test_reading_time_custom_speed() {
        assert_eq!(reading_time_minutes(250, 250), 1);
        assert_eq!(reading_time_minutes(251, 250), 2);
        assert_eq!(reading_time_minutes(3, 0), 3);
    }

    #[test]
    fn test_stats_snapshot() {
        let text = "word ".repeat(201);
        let stats = TextStats::of(&text, DEFAULT_WORDS_PER_MINUTE);
        assert_eq!(
            stats,
            TextStats {
                words: 201,
                characters: 1005,
                reading_time_minutes: 2,
            }
        );
    }

    #[test]
    fn test_stats_serialize_field_names() {
        let stats = TextStats::of("two words", DEFAULT_WORDS_PER_MINUTE);
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "words": 2,
                "characters": 9,
                "reading_time_minutes": 1
            })
        );
    }

    proptest! {
        #[test]
        fn prop_character_count_matches_char_length(s in any::<String>()) {
            prop_assert_eq!(character_count(&s), s.chars().count());
        }

        #[test]
        fn prop_words_never_exceed_characters(s in any::<String>()) {
            prop_assert!(word_count(&s) <= character_count(&s));
        }
    }
}
