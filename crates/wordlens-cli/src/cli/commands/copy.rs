//! Copy command handler.

use anyhow::{Context, Result};
use wordlens_core::config::Config;
use wordlens_core::{SystemClipboard, TextEngine, TokioTimer, TransformKind};

pub fn run(text: String, transforms: &[TransformKind], config: &Config) -> Result<()> {
    let clipboard = clipboard_for(config);
    let timer = TokioTimer::current()?;
    let mut engine = TextEngine::with_options(clipboard, timer, config.engine_options());

    engine.set_text(text);
    for kind in transforms {
        engine.transform(*kind);
    }

    engine.copy_to_clipboard().context("copy to clipboard")?;
    println!(
        "Copied! ({} characters, {} words)",
        engine.character_count(),
        engine.word_count()
    );
    Ok(())
}

/// The process exits right after copying, so the system clipboard is held
/// until something else replaces it.
fn clipboard_for(config: &Config) -> SystemClipboard {
    SystemClipboard::from_config(&config.clipboard).with_wait_for_paste(true)
}
