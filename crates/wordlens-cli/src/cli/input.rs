//! Where text-taking commands get their text from.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Text source shared by text-taking commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Text to use (reads stdin when neither --text nor --file is given)
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,

    /// Read the text from a file (one trailing line ending is dropped)
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
}

impl InputArgs {
    /// Resolves the text: `--text`, then `--file`, then stdin.
    ///
    /// A single trailing line ending is stripped from stdin and file input,
    /// since `echo` and most editors add one the user never typed.
    pub fn read(&self) -> Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }

        if let Some(path) = &self.file {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            return Ok(strip_line_ending(text));
        }

        let mut text = String::new();
        std::io::stdin()
            .lock()
            .read_to_string(&mut text)
            .context("read stdin")?;
        Ok(strip_line_ending(text))
    }
}

fn strip_line_ending(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}
