//! The text engine: owns the text being analyzed and the copy acknowledgment.
//!
//! All operations run to completion on the caller. The only deferred work is
//! the acknowledgment reset, scheduled on the injected [`Timer`]. At most one
//! reset is pending per engine; copying again cancels it and arms a fresh one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::clipboard::{ClipboardError, ClipboardWriter};
use crate::text::{self, DEFAULT_WORDS_PER_MINUTE, TextStats, TransformKind};
use crate::timer::Timer;

/// How long the copy acknowledgment stays set after a successful copy.
pub const DEFAULT_COPY_FEEDBACK: Duration = Duration::from_millis(2000);

/// Tunables for a [`TextEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Reading speed used for the reading-time estimate.
    pub words_per_minute: u32,
    /// How long [`TextEngine::is_copied`] stays true after a copy.
    pub copy_feedback: Duration,
    /// Reverse by grapheme cluster instead of by `char`.
    pub grapheme_reverse: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            copy_feedback: DEFAULT_COPY_FEEDBACK,
            grapheme_reverse: false,
        }
    }
}

/// Owns a text value, transforms it, and reports statistics about it.
pub struct TextEngine<C, T: Timer> {
    text: String,
    /// Bit 0 is the acknowledgment flag; the rest holds the generation of
    /// the copy that set it. A reset only clears the flag if the generation
    /// still matches, so a stale reset can never clear a newer copy.
    copy_state: Arc<AtomicU64>,
    copy_generation: u64,
    pending_reset: Option<T::Handle>,
    clipboard: C,
    timer: T,
    options: EngineOptions,
}

impl<C: ClipboardWriter, T: Timer> TextEngine<C, T> {
    /// Creates an engine with empty text and default options.
    pub fn new(clipboard: C, timer: T) -> Self {
        Self::with_options(clipboard, timer, EngineOptions::default())
    }

    pub fn with_options(clipboard: C, timer: T, options: EngineOptions) -> Self {
        Self {
            text: String::new(),
            copy_state: Arc::new(AtomicU64::new(0)),
            copy_generation: 0,
            pending_reset: None,
            clipboard,
            timer,
            options,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Returns the current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the text for display, or `None` when there is nothing to show.
    pub fn preview(&self) -> Option<&str> {
        (!self.text.is_empty()).then_some(self.text.as_str())
    }

    /// Replaces the text unconditionally.
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.text = value.into();
    }

    /// Replaces the text with the result of `kind`.
    pub fn transform(&mut self, kind: TransformKind) {
        self.text = kind.apply(&self.text, self.options.grapheme_reverse);
        tracing::debug!(%kind, chars = self.character_count(), "applied transform");
    }

    /// Empties the text. The copy acknowledgment is left alone.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn word_count(&self) -> usize {
        text::word_count(&self.text)
    }

    pub fn character_count(&self) -> usize {
        text::character_count(&self.text)
    }

    /// Estimated reading time in whole minutes, rounded up.
    pub fn reading_time(&self) -> usize {
        text::reading_time_minutes(self.word_count(), self.options.words_per_minute)
    }

    pub fn stats(&self) -> TextStats {
        TextStats::of(&self.text, self.options.words_per_minute)
    }

    /// True while a recent copy is within its feedback window.
    pub fn is_copied(&self) -> bool {
        self.copy_state.load(Ordering::SeqCst) & 1 == 1
    }

    /// Writes the current text to the clipboard.
    ///
    /// On success the acknowledgment is set and its reset re-armed for the
    /// full feedback window. On failure the acknowledgment is untouched and
    /// the error is handed back for the caller to surface.
    pub fn copy_to_clipboard(&mut self) -> Result<(), ClipboardError> {
        if let Err(err) = self.clipboard.write(&self.text) {
            tracing::warn!(%err, "clipboard write failed");
            return Err(err);
        }

        self.arm_copy_reset();
        Ok(())
    }

    fn arm_copy_reset(&mut self) {
        if let Some(handle) = self.pending_reset.take() {
            self.timer.cancel(handle);
        }

        self.copy_generation = self.copy_generation.wrapping_add(1);
        let armed = (self.copy_generation << 1) | 1;
        self.copy_state.store(armed, Ordering::SeqCst);

        let copy_state = Arc::clone(&self.copy_state);
        let handle = self.timer.schedule(
            self.options.copy_feedback,
            Box::new(move || {
                let _ = copy_state.compare_exchange(
                    armed,
                    armed & !1,
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                );
            }),
        );
        self.pending_reset = Some(handle);

        tracing::debug!(
            generation = self.copy_generation,
            feedback_ms = self.options.copy_feedback.as_millis() as u64,
            "copy acknowledged"
        );
    }
}

impl<C, T: Timer> Drop for TextEngine<C, T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending_reset.take() {
            self.timer.cancel(handle);
        }
    }
}

impl<C, T: Timer> std::fmt::Debug for TextEngine<C, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEngine")
            .field("text", &self.text)
            .field("copied", &(self.copy_state.load(Ordering::SeqCst) & 1 == 1))
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
