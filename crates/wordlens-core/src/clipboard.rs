//! Clipboard capability.
//!
//! The engine only sees [`ClipboardWriter`]. [`SystemClipboard`] is the real
//! implementation, with two transports tried in order:
//! 1. OSC 52 - Terminal clipboard escape sequence (works over SSH)
//! 2. System clipboard via `arboard` crate

use std::io::{IsTerminal, Write};

use crate::config::ClipboardConfig;

/// Something that can receive the text being copied.
pub trait ClipboardWriter {
    /// Writes `text` to the clipboard.
    fn write(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard interface with multiple transport fallbacks.
#[derive(Debug, Clone, Copy)]
pub struct SystemClipboard {
    osc52: bool,
    system: bool,
    wait_for_paste: bool,
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self {
            osc52: true,
            system: true,
            wait_for_paste: false,
        }
    }
}

impl SystemClipboard {
    /// Builds a clipboard with the transports enabled in `config`.
    pub fn from_config(config: &ClipboardConfig) -> Self {
        Self {
            osc52: config.osc52,
            system: config.system,
            wait_for_paste: false,
        }
    }

    /// Keeps serving the system clipboard until another application takes
    /// ownership of it.
    ///
    /// On X11 and Wayland the copying process owns the clipboard contents, so
    /// a process that exits right after copying loses them unless a clipboard
    /// manager is running. Short-lived callers turn this on; it only has an
    /// effect on Linux.
    #[must_use]
    pub fn with_wait_for_paste(mut self, wait: bool) -> Self {
        self.wait_for_paste = wait;
        self
    }

    pub fn waits_for_paste(&self) -> bool {
        self.wait_for_paste
    }

    /// Copies text using the OSC 52 escape sequence.
    ///
    /// The terminal intercepts the sequence on stdout and copies the payload
    /// to the system clipboard. Refuses when stdout is not a terminal so
    /// piped output stays clean.
    ///
    /// `Ok` means the sequence was emitted, not that the clipboard was set:
    /// terminals without OSC 52 support silently ignore it.
    fn copy_osc52(text: &str) -> Result<(), ClipboardError> {
        use base64::Engine;

        let mut stdout = std::io::stdout();
        if !stdout.is_terminal() {
            return Err(ClipboardError::Osc52("stdout is not a terminal".to_string()));
        }

        let encoded = base64::engine::general_purpose::STANDARD.encode(text);

        // OSC 52 format: ESC ] 52 ; c ; <base64-data> ESC \
        // - 'c' specifies the clipboard selection (system clipboard)
        write!(stdout, "\x1b]52;c;{encoded}\x1b\\")
            .map_err(|e| ClipboardError::Osc52(e.to_string()))?;
        stdout
            .flush()
            .map_err(|e| ClipboardError::Osc52(e.to_string()))?;

        Ok(())
    }

    /// Copies text using the system clipboard.
    ///
    /// With `wait_for_paste` on Linux this blocks until another application
    /// replaces the clipboard contents.
    fn copy_system(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::System(e.to_string()))?;

        #[cfg(target_os = "linux")]
        if self.wait_for_paste {
            use arboard::SetExtLinux;

            tracing::debug!("serving clipboard until another application takes it");
            return clipboard
                .set()
                .wait()
                .text(text)
                .map_err(|e| ClipboardError::System(e.to_string()));
        }

        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::System(e.to_string()))?;

        Ok(())
    }
}

impl ClipboardWriter for SystemClipboard {
    /// Tries OSC 52 first, then the system clipboard.
    ///
    /// Returns `Ok(())` if any enabled transport succeeded, otherwise the
    /// error from the last one attempted. For OSC 52, success means the
    /// escape sequence reached the terminal (see [`SystemClipboard::copy_osc52`]).
    fn write(&self, text: &str) -> Result<(), ClipboardError> {
        let mut last_err = ClipboardError::Unavailable;

        if self.osc52 {
            match Self::copy_osc52(text) {
                Ok(()) => return Ok(()),
                Err(err) => {
                    tracing::debug!(%err, "OSC 52 copy failed, falling back");
                    last_err = err;
                }
            }
        }

        if self.system {
            match self.copy_system(text) {
                Ok(()) => return Ok(()),
                Err(err) => last_err = err,
            }
        }

        Err(last_err)
    }
}

/// Clipboard operation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// OSC 52 write failed.
    Osc52(String),
    /// System clipboard operation failed.
    System(String),
    /// No transport is enabled.
    Unavailable,
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::Osc52(msg) => write!(f, "OSC 52 clipboard failed: {msg}"),
            ClipboardError::System(msg) => write!(f, "System clipboard failed: {msg}"),
            ClipboardError::Unavailable => write!(f, "No clipboard transport is enabled"),
        }
    }
}

impl std::error::Error for ClipboardError {}
