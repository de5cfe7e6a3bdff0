//! Pure text functions: case transforms and derived statistics.
//!
//! Everything here is total over `&str`; the engine layers ownership and
//! side effects on top.

pub mod stats;
pub mod transform;

pub use stats::{
    DEFAULT_WORDS_PER_MINUTE, TextStats, character_count, reading_time_minutes, word_count,
};
pub use transform::{ParseTransformError, TransformKind, capitalize, reverse, reverse_graphemes};
