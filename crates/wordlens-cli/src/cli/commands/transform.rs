//! Transform command handler.

use wordlens_core::TransformKind;
use wordlens_core::config::Config;

pub fn run(text: &str, kinds: &[TransformKind], config: &Config) {
    println!("{}", apply_all(text, kinds, config));
}

/// Applies `kinds` left to right.
pub fn apply_all(text: &str, kinds: &[TransformKind], config: &Config) -> String {
    let grapheme_reverse = config.transform.grapheme_reverse;
    kinds
        .iter()
        .fold(text.to_string(), |acc, kind| kind.apply(&acc, grapheme_reverse))
}
